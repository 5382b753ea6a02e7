//! Table operations, each module adds `impl Database` blocks for one table.

mod notes;
