//! Database operations for the notes table

use kanban_types::{Note, DEFAULT_NOTE_TYPE};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{Database, DbError};

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        note_type: row.get(1)?,
        text: row.get(2)?,
    })
}

impl Database {
    /// All notes, ordered by type then text
    pub fn list_notes(&self) -> Result<Vec<Note>, DbError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, note_type, text FROM notes
             ORDER BY note_type ASC, text ASC",
        )?;
        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Number of notes in the whole collection
    pub fn count_notes(&self) -> Result<i64, DbError> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Insert a note into the default column. `text` is stored as given.
    pub fn create_note(&self, text: &str) -> Result<Note, DbError> {
        let conn = self.conn()?;
        let id = uuid::Uuid::new_v4().to_string();
        let note = conn.query_row(
            "INSERT INTO notes (id, note_type, text) VALUES (?1, ?2, ?3)
             RETURNING id, note_type, text",
            params![id, DEFAULT_NOTE_TYPE, text],
            row_to_note,
        )?;
        Ok(note)
    }

    /// Overwrite the text of a note. Returns `None` if no note has this id.
    pub fn update_note_text(&self, id: &str, text: &str) -> Result<Option<Note>, DbError> {
        let conn = self.conn()?;
        let note = conn
            .query_row(
                "UPDATE notes SET text = ?1 WHERE id = ?2
                 RETURNING id, note_type, text",
                params![text, id],
                row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    /// Move a note to another column. Returns `None` if no note has this id.
    pub fn update_note_type(&self, id: &str, note_type: &str) -> Result<Option<Note>, DbError> {
        let conn = self.conn()?;
        let note = conn
            .query_row(
                "UPDATE notes SET note_type = ?1 WHERE id = ?2
                 RETURNING id, note_type, text",
                params![note_type, id],
                row_to_note,
            )
            .optional()?;
        Ok(note)
    }

    /// Remove a note, handing back what was deleted
    pub fn delete_note(&self, id: &str) -> Result<Option<Note>, DbError> {
        let conn = self.conn()?;
        let note = conn
            .query_row(
                "DELETE FROM notes WHERE id = ?1 RETURNING id, note_type, text",
                params![id],
                row_to_note,
            )
            .optional()?;
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn test_db() -> (TempDir, Database) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::new(db_path.to_str().unwrap(), 2).expect("Failed to open database");
        (dir, db)
    }

    #[test]
    fn test_create_note_defaults_to_ideas() {
        let (_dir, db) = test_db();

        let note = db.create_note("buy milk").expect("Failed to create note");
        assert_eq!(note.note_type, "ideas");
        assert_eq!(note.text, "buy milk");
        assert!(!note.id.is_empty());

        let notes = db.list_notes().unwrap();
        assert_eq!(notes, vec![note]);
    }

    #[test]
    fn test_ids_are_unique() {
        let (_dir, db) = test_db();

        let a = db.create_note("same").unwrap();
        let b = db.create_note("same").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(db.count_notes().unwrap(), 2);
    }

    #[test]
    fn test_list_orders_by_type_then_text() {
        let (_dir, db) = test_db();

        let x = db.create_note("x").unwrap();
        db.update_note_type(&x.id, "b").unwrap();
        let y = db.create_note("y").unwrap();
        db.update_note_type(&y.id, "a").unwrap();
        let w = db.create_note("w").unwrap();
        db.update_note_type(&w.id, "b").unwrap();

        let order: Vec<(String, String)> = db
            .list_notes()
            .unwrap()
            .into_iter()
            .map(|n| (n.note_type, n.text))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a".to_string(), "y".to_string()),
                ("b".to_string(), "w".to_string()),
                ("b".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn test_update_text_keeps_value_verbatim() {
        let (_dir, db) = test_db();

        let note = db.create_note("draft").unwrap();
        let updated = db
            .update_note_text(&note.id, "  final copy  ")
            .unwrap()
            .expect("Note should exist");

        assert_eq!(updated.id, note.id);
        assert_eq!(updated.note_type, "ideas");
        assert_eq!(updated.text, "  final copy  ");
    }

    #[test]
    fn test_update_missing_note_returns_none() {
        let (_dir, db) = test_db();

        assert!(db.update_note_text("nope", "text").unwrap().is_none());
        assert!(db.update_note_type("nope", "done").unwrap().is_none());
        assert!(db.delete_note("nope").unwrap().is_none());
    }

    #[test]
    fn test_schema_rejects_blank_fields() {
        let (_dir, db) = test_db();

        assert!(db.create_note("   ").is_err());

        let note = db.create_note("keep me").unwrap();
        assert!(db.update_note_text(&note.id, "").is_err());
        assert!(db.update_note_type(&note.id, " ").is_err());

        let notes = db.list_notes().unwrap();
        assert_eq!(notes, vec![note]);
    }

    #[test]
    fn test_delete_note() {
        let (_dir, db) = test_db();

        let keep = db.create_note("keep").unwrap();
        let gone = db.create_note("gone").unwrap();

        let deleted = db.delete_note(&gone.id).unwrap().expect("Note should exist");
        assert_eq!(deleted, gone);

        assert_eq!(db.list_notes().unwrap(), vec![keep]);
        assert_eq!(db.count_notes().unwrap(), 1);
        assert!(db.delete_note(&gone.id).unwrap().is_none());
    }
}
