//! Notes REST API: list, create, update and delete kanban notes.
//!
//! Every response is wrapped in an `{ ok, ... }` envelope. Bodies may be sent
//! as JSON or as a url-encoded form.

use actix_web::dev::Payload;
use actix_web::http::header::{CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING};
use actix_web::{web, Either, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use kanban_types::{
    non_blank, trim_field, CreateNoteRequest, ListNotesResponse, NoteResponse,
    UpdateNoteTextRequest, UpdateNoteTypeRequest,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::AppState;

/// Request body accepted as JSON or as a url-encoded form. A request that
/// carries no body at all reads as an empty request.
struct NoteBody<T>(T);

/// True when the request declares a zero-length body, or sends no body
/// headers at all.
fn has_no_body(req: &HttpRequest) -> bool {
    let headers = req.headers();
    match headers.get(CONTENT_LENGTH) {
        Some(len) => len.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok()) == Some(0),
        None => !headers.contains_key(TRANSFER_ENCODING) && !headers.contains_key(CONTENT_TYPE),
    }
}

impl<T: DeserializeOwned + Default + 'static> FromRequest for NoteBody<T> {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if has_no_body(req) {
            return Box::pin(async { Ok::<_, actix_web::Error>(NoteBody(T::default())) });
        }

        let body = Either::<web::Json<T>, web::Form<T>>::from_request(req, payload);
        Box::pin(async move {
            match body.await {
                Ok(Either::Left(json)) => Ok(NoteBody(json.into_inner())),
                Ok(Either::Right(form)) => Ok(NoteBody(form.into_inner())),
                Err(err) => Err(actix_web::Error::from(err)),
            }
        })
    }
}

/// Turn an unparseable body into a 400 envelope instead of actix's plain-text error
fn body_error<E: std::fmt::Display>(err: E, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}

/// GET /notes
async fn list_notes(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let db = data.db.clone();
    let (notes, total) = web::block(move || {
        let notes = db.list_notes()?;
        let total = db.count_notes()?;
        Ok::<_, crate::db::DbError>((notes, total))
    })
    .await??;

    Ok(HttpResponse::Ok().json(ListNotesResponse {
        ok: true,
        total,
        notes,
    }))
}

/// POST /notes
async fn create_note(
    data: web::Data<AppState>,
    NoteBody(body): NoteBody<CreateNoteRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = non_blank(body.text.as_deref())
        .map(trim_field)
        .ok_or_else(ApiError::data_required)?
        .to_string();

    let db = data.db.clone();
    let note = web::block(move || db.create_note(&text)).await??;

    log::info!("[NOTES] Created note {}", note.id);
    Ok(HttpResponse::Ok().json(NoteResponse::ok(note)))
}

/// PUT /notes/text/{id}
async fn update_note_text(
    data: web::Data<AppState>,
    path: web::Path<String>,
    NoteBody(body): NoteBody<UpdateNoteTextRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = non_blank(body.text.as_deref())
        .ok_or_else(ApiError::data_required)?
        .to_string();
    let id = path.into_inner();

    let db = data.db.clone();
    let note = web::block(move || db.update_note_text(&id, &text))
        .await??
        .ok_or_else(ApiError::data_not_found)?;

    Ok(HttpResponse::Ok().json(NoteResponse::ok(note)))
}

/// PUT /notes/type/{id}
async fn update_note_type(
    data: web::Data<AppState>,
    path: web::Path<String>,
    NoteBody(body): NoteBody<UpdateNoteTypeRequest>,
) -> Result<HttpResponse, ApiError> {
    let note_type = non_blank(body.note_type.as_deref())
        .ok_or_else(ApiError::data_required)?
        .to_string();
    let id = path.into_inner();

    let db = data.db.clone();
    let note = web::block(move || db.update_note_type(&id, &note_type))
        .await??
        .ok_or_else(ApiError::data_not_found)?;

    Ok(HttpResponse::Ok().json(NoteResponse::ok(note)))
}

/// DELETE /notes/{id}
async fn delete_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let db = data.db.clone();
    let note = web::block(move || db.delete_note(&id))
        .await??
        .ok_or_else(ApiError::data_not_found)?;

    log::info!("[NOTES] Deleted note {}", note.id);
    Ok(HttpResponse::Ok().json(NoteResponse::ok(note)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(body_error))
        .app_data(web::FormConfig::default().error_handler(body_error))
        .service(
            web::scope("/notes")
                .route("", web::get().to(list_notes))
                .route("", web::post().to(create_note))
                .route("/text/{id}", web::put().to(update_note_text))
                .route("/type/{id}", web::put().to(update_note_type))
                .route("/{id}", web::delete().to(delete_note)),
        );
}
