//! Database layer: connection pool, schema bootstrap, and the question store

pub mod pool;
pub mod questions;
pub mod schema;

pub use pool::create_db_pool;
pub use questions::{PostgresQuestionStore, QuestionStore};
pub use schema::ensure_schema;
