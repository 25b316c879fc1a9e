//! Question API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    models::{ImportRequest, NewQuestion, SearchRequest},
    state::AppState,
    Result,
};

pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
        .into_response()
}

pub async fn list_questions(State(state): State<AppState>) -> Result<Response> {
    let questions = state.crud_service.list().await?;

    Ok((StatusCode::OK, Json(questions)).into_response())
}

pub async fn create_question(
    State(state): State<AppState>,
    Json(input): Json<NewQuestion>,
) -> Result<Response> {
    let question = state.crud_service.create(input).await?;

    Ok((StatusCode::CREATED, Json(question)).into_response())
}

pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<NewQuestion>,
) -> Result<Response> {
    let question = state.crud_service.update(id, input).await?;

    Ok((StatusCode::OK, Json(question)).into_response())
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    state.crud_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn search_questions(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Response> {
    let questions = state.search_service.search(request).await?;

    Ok((StatusCode::OK, Json(questions)).into_response())
}

pub async fn import_questions(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> Result<Response> {
    let outcome = state.import_service.import(&request.csv_text).await?;

    Ok((StatusCode::OK, Json(outcome)).into_response())
}
