use crate::api::handlers::questions;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn question_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        // Static segment must be registered alongside the parameterized one.
        .route("/questions/import", post(questions::import_questions))
        .route(
            "/questions/:id",
            put(questions::update_question).delete(questions::delete_question),
        )
        .route("/search", post(questions::search_questions))
}
