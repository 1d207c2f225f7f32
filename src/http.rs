use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;
use crate::models::AppState;
use crate::recurrence::expand_bounded;
use crate::rule::{weekday_code, RecurrenceRule, RecurrenceRuleSpec};
use crate::utils::format_calendar_date;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rule: RecurrenceRuleSpec,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpandResponse {
    pub occurrences: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/recurrence/expand", post(handle_expand))
        .layer(Extension(state))
}

async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub async fn handle_expand(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ExpandRequest>,
) -> Response {
    let rule = match RecurrenceRule::try_from(req.rule) {
        Ok(rule) => rule,
        Err(e) => {
            tracing::warn!(error = %e, "rejected recurrence rule");
            return error_response(&e);
        }
    };

    if !rule.by_weekday().is_empty() {
        let codes: Vec<&str> = rule.by_weekday().iter().copied().map(weekday_code).collect();
        tracing::debug!(by_weekday = ?codes, "byWeekday is not applied when stepping");
    }

    match expand_bounded(req.start_date, req.end_date, &rule, state.limits()) {
        Ok(dates) => {
            tracing::debug!(
                frequency = %rule.frequency(),
                interval = rule.interval().get(),
                start = %req.start_date,
                end = %req.end_date,
                count = dates.len(),
                "expanded recurrence"
            );
            let occurrences = dates.into_iter().map(format_calendar_date).collect();
            (StatusCode::OK, Json(ExpandResponse { occurrences })).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, start = %req.start_date, end = %req.end_date, "expansion refused");
            error_response(&e)
        }
    }
}

fn status_for(err: &RecurrenceError) -> StatusCode {
    match err {
        RecurrenceError::TooManyOccurrences { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn error_response(err: &RecurrenceError) -> Response {
    let body = ErrorBody {
        error: err.to_string(),
    };
    (status_for(err), Json(body)).into_response()
}
