use crate::analytics::build_analytics;
use crate::errors::AppError;
use crate::history::{SpinRecord, DEFAULT_RECENT_LIMIT};
use crate::models::{
    AnalyticsReport, ExportFormat, ExportQuery, HealthResponse, HistoryQuery, ImportResponse,
    NameRequest, RecentQuery, WeightRequest, WheelResponse,
};
use crate::state::AppState;
use crate::ui::render_index;
use crate::users::{User, UserStatsEntry};
use crate::workspace::SpinOutcome;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let workspace = state.data.lock().await;
    let wheel = workspace.wheel();
    Html(render_index(wheel.spin_duration_ms(), workspace.users().count()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let workspace = state.data.lock().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        users: workspace.users().count(),
        spins: workspace.history().len(),
    })
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let workspace = state.data.lock().await;
    Json(workspace.users().all_users().to_vec())
}

pub async fn add_user(
    State(state): State<AppState>,
    Json(payload): Json<NameRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let user = workspace.users_mut().add_user(&payload.name)?;
    state.commit(&mut workspace, before).await?;

    info!(id = %user.id, name = %user.name, "user added");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn remove_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    if !workspace.users_mut().remove_user(&id) {
        return Err(AppError::not_found(format!("user {id} not found")));
    }
    state.commit(&mut workspace, before).await?;

    info!(%id, "user removed");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let user = workspace.users_mut().toggle_participation(&id)?.clone();
    state.commit(&mut workspace, before).await?;
    Ok(Json(user))
}

pub async fn update_weight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<WeightRequest>,
) -> Result<Json<User>, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let user = workspace.users_mut().update_weight(&id, payload.weight)?.clone();
    state.commit(&mut workspace, before).await?;
    Ok(Json(user))
}

pub async fn update_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NameRequest>,
) -> Result<Json<User>, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let user = workspace.users_mut().update_name(&id, &payload.name)?.clone();
    state.commit(&mut workspace, before).await?;
    Ok(Json(user))
}

pub async fn reset_user_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let user = workspace.users_mut().reset_user_stats(&id)?.clone();
    state.commit(&mut workspace, before).await?;
    Ok(Json(user))
}

pub async fn user_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<SpinRecord>> {
    let workspace = state.data.lock().await;
    Json(workspace.history().for_user(&id))
}

pub async fn user_stats(State(state): State<AppState>) -> Json<BTreeMap<String, UserStatsEntry>> {
    let workspace = state.data.lock().await;
    Json(workspace.users().user_stats())
}

pub async fn export_users(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let workspace = state.data.lock().await;
    let users = workspace.users();
    let body = match query.format {
        ExportFormat::Json => users.export_json().map_err(AppError::internal)?,
        ExportFormat::Csv => users.export_csv().map_err(AppError::internal)?,
    };
    Ok(attachment("tooli-users", query.format, body))
}

pub async fn import_users(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let imported = workspace.users_mut().import_json(&body)?;
    state.commit(&mut workspace, before).await?;

    let total = workspace.users().count();
    info!(imported, total, "users imported");
    Ok(Json(ImportResponse { imported, total }))
}

pub async fn get_wheel(State(state): State<AppState>) -> Json<WheelResponse> {
    let workspace = state.data.lock().await;
    let wheel = workspace.wheel();
    Json(WheelResponse {
        segments: wheel.segments().to_vec(),
        spin_duration_ms: wheel.spin_duration_ms(),
    })
}

pub async fn spin(State(state): State<AppState>) -> Result<Json<SpinOutcome>, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let outcome = workspace.spin(&mut rand::thread_rng())?;

    if let Some(record) = &outcome.record {
        state.commit(&mut workspace, before).await?;
        info!(user = %record.user_name, probability = record.probability, "spin recorded");
    } else {
        info!(prize = %outcome.result.prize, "spin landed on a placeholder segment");
    }
    Ok(Json(outcome))
}

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<SpinRecord>> {
    let workspace = state.data.lock().await;
    let history = workspace.history();

    let mut records = match (query.from, query.to) {
        (None, None) => history.all().to_vec(),
        (from, to) => history.in_range(
            from.unwrap_or(DateTime::<Utc>::MIN_UTC),
            to.unwrap_or(DateTime::<Utc>::MAX_UTC),
        ),
    };
    if let Some(user_id) = &query.user_id {
        records.retain(|record| &record.user_id == user_id);
    }
    if let Some(limit) = query.limit {
        records.truncate(limit);
    }
    Json(records)
}

pub async fn recent_history(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<SpinRecord>> {
    let workspace = state.data.lock().await;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    Json(workspace.history().recent(limit).to_vec())
}

pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    workspace.history_mut().clear();
    state.commit(&mut workspace, before).await?;

    info!("history cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export_history(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let workspace = state.data.lock().await;
    let history = workspace.history();
    let body = match query.format {
        ExportFormat::Json => history.export_json().map_err(AppError::internal)?,
        ExportFormat::Csv => history.export_csv().map_err(AppError::internal)?,
    };
    Ok(attachment("tooli-history", query.format, body))
}

pub async fn import_history(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    let imported = workspace.history_mut().import_json(&body)?;
    state.commit(&mut workspace, before).await?;

    let total = workspace.history().len();
    info!(imported, "history imported");
    Ok(Json(ImportResponse { imported, total }))
}

pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsReport> {
    let workspace = state.data.lock().await;
    Json(build_analytics(workspace.users(), workspace.history()))
}

pub async fn reset_all(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut workspace = state.data.lock().await;
    let before = workspace.clone();
    workspace.reset_all();
    state.commit(&mut workspace, before).await?;

    info!("history and user stats reset");
    Ok(StatusCode::NO_CONTENT)
}

fn attachment(stem: &str, format: ExportFormat, body: String) -> Response {
    let (content_type, extension) = match format {
        ExportFormat::Json => ("application/json", "json"),
        ExportFormat::Csv => ("text/csv; charset=utf-8", "csv"),
    };
    let filename = format!("{stem}-{}.{extension}", Utc::now().date_naive());
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_MAX_HISTORY;
    use crate::wheel::DEFAULT_SPIN_DURATION_MS;
    use crate::workspace::Workspace;

    fn unwritable_state(workspace: Workspace) -> AppState {
        let path = std::env::temp_dir()
            .join(format!("tooli_missing_dir_{}", std::process::id()))
            .join("data.json");
        AppState::new(path, workspace)
    }

    #[tokio::test]
    async fn failed_persist_rolls_back_added_user() {
        let state = unwritable_state(Workspace::new(DEFAULT_MAX_HISTORY, DEFAULT_SPIN_DURATION_MS));

        let result = add_user(
            State(state.clone()),
            Json(NameRequest {
                name: "Ann".to_string(),
            }),
        )
        .await;
        let Err(err) = result else {
            panic!("add_user should fail when the data file cannot be written");
        };
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.data.lock().await.users().count(), 0);
    }

    #[tokio::test]
    async fn failed_persist_rolls_back_spin() {
        let mut workspace = Workspace::new(DEFAULT_MAX_HISTORY, DEFAULT_SPIN_DURATION_MS);
        workspace.seed_default_users().unwrap();
        let state = unwritable_state(workspace);

        let Err(err) = spin(State(state.clone())).await else {
            panic!("spin should fail when the data file cannot be written");
        };
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let workspace = state.data.lock().await;
        assert!(workspace.history().is_empty());
        assert!(workspace
            .users()
            .all_users()
            .iter()
            .all(|user| user.stats.wins == 0 && user.stats.total_spins == 0));
    }
}
