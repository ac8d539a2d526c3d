use crate::errors::{AppError, FollowUpError};
use crate::models::{
    Dashboard, FollowUp, FollowUpBook, MessageResponse, NewFollowUp, Stats, UpdateFollowUp,
};
use crate::state::AppState;
use crate::storage::persist_book;
use crate::ui::render_dashboard;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::{json, Value};
use tracing::{error, info};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> AppError {
    AppError::not_found("Not found")
}

pub async fn list_followups(State(state): State<AppState>) -> Json<Vec<FollowUp>> {
    let data = state.data.lock().await;
    Json(data.list())
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    let now = state.now();
    let data = state.data.lock().await;
    Json(state.classifier.aggregate(data.followups.values(), now))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    Json(snapshot(&state).await)
}

pub async fn create_followup(
    State(state): State<AppState>,
    payload: Result<Json<NewFollowUp>, JsonRejection>,
) -> Result<(StatusCode, Json<FollowUp>), AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let created = apply_create(&state, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_followup(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdateFollowUp>, JsonRejection>,
) -> Result<Json<FollowUp>, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let Json(changes) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    if changes.status.is_none() {
        let data = state.data.lock().await;
        return Ok(Json(data.get(id)?.clone()));
    }

    let updated = mutate(&state, |book| book.update(id, &changes)).await?;
    info!(id, status = %updated.status, "follow-up updated");
    Ok(Json(updated))
}

pub async fn delete_followup(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    mutate(&state, |book| book.delete(id)).await?;
    info!(id, "follow-up deleted");
    Ok(Json(MessageResponse {
        message: "Follow-up deleted successfully".to_string(),
    }))
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let dashboard = snapshot(&state).await;
    Html(render_dashboard(&dashboard, None))
}

pub async fn form_create(
    State(state): State<AppState>,
    payload: Result<Form<NewFollowUp>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(payload) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    match apply_create(&state, &payload).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err) if err.status == StatusCode::BAD_REQUEST => {
            let dashboard = snapshot(&state).await;
            Ok((
                StatusCode::BAD_REQUEST,
                Html(render_dashboard(&dashboard, Some(&err.message))),
            )
                .into_response())
        }
        Err(err) => Err(err),
    }
}

pub async fn form_complete(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Redirect, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    mutate(&state, |book| book.complete(id)).await?;
    info!(id, "follow-up completed");
    Ok(Redirect::to("/"))
}

pub async fn form_delete(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Redirect, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    mutate(&state, |book| book.delete(id)).await?;
    info!(id, "follow-up deleted");
    Ok(Redirect::to("/"))
}

async fn apply_create(state: &AppState, payload: &NewFollowUp) -> Result<FollowUp, AppError> {
    let input = payload.validate()?;
    let created_at = state.now();
    let created = mutate(state, |book| book.create(input, created_at)).await?;
    info!(id = created.id, date = %created.followup_date, "follow-up created");
    Ok(created)
}

/// Runs `op` on a copy of the book and swaps it in only once it is on disk.
async fn mutate<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    F: FnOnce(&mut FollowUpBook) -> Result<T, FollowUpError>,
{
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let output = op(&mut next)?;

    if let Err(err) = persist_book(&state.data_path, &next).await {
        error!("failed to persist follow-ups: {err}");
        return Err(err.into());
    }
    *data = next;
    Ok(output)
}

/// One collection snapshot classified against one reference instant.
async fn snapshot(state: &AppState) -> Dashboard {
    let now = state.now();
    let items = state.data.lock().await.list();
    state.classifier.dashboard(&items, now)
}
