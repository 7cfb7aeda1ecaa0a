//! HTTP request handlers for the Leave Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{LeaveRequestDraft, NewHoliday};

use super::request::{PreviewRequest, RegisterEmployeeRequest, ReviewRequest, YearQuery};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the acting employee's id.
pub const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/leave/preview", post(preview_handler))
        .route(
            "/leave/requests",
            post(submit_handler).get(list_requests_handler),
        )
        .route("/leave/requests/:id", delete(delete_request_handler))
        .route("/leave/requests/:id/approve", post(approve_handler))
        .route("/leave/requests/:id/reject", post(reject_handler))
        .route("/employees/:id", put(register_employee_handler))
        .route("/employees/:id/balance", get(balance_handler))
        .route("/employees/:id/summary", get(summary_handler))
        .route(
            "/holidays",
            get(list_holidays_handler).post(create_holiday_handler),
        )
        .route("/holidays/:id", delete(delete_holiday_handler))
        .with_state(state)
}

/// Handler for POST /leave/preview.
///
/// Returns the day count a range would charge without creating anything.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave preview");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let result = request
        .range()
        .and_then(|range| state.leave().preview(&range, request.is_sandwich_leave));
    respond(correlation_id, "Leave preview", StatusCode::OK, result)
}

/// Handler for POST /leave/requests.
///
/// Submits a pending request on behalf of the employee named in the
/// `X-Employee-Id` header.
async fn submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LeaveRequestDraft>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match acting_employee(&headers, correlation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing leave submission"
    );

    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let result = state.leave().submit(&employee_id, draft, Utc::now());
    respond(correlation_id, "Leave submission", StatusCode::CREATED, result)
}

/// Handler for GET /leave/requests.
///
/// Lists the acting employee's own requests.
async fn list_requests_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match acting_employee(&headers, correlation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = state.leave().list_for_employee(&employee_id);
    respond(correlation_id, "Leave request listing", StatusCode::OK, result)
}

/// Handler for POST /leave/requests/:id/approve.
async fn approve_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (request_id, approver_id) = match request_target(&headers, path, correlation_id) {
        Ok(target) => target,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        request_id = %request_id,
        approver_id = %approver_id,
        "Processing leave approval"
    );

    let remarks = match review_payload(&body, correlation_id) {
        Ok(review) => review.remarks,
        Err(response) => return response,
    };
    let result = state
        .leave()
        .approve(request_id, &approver_id, remarks, Utc::now());
    respond(correlation_id, "Leave approval", StatusCode::OK, result)
}

/// Handler for POST /leave/requests/:id/reject.
async fn reject_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (request_id, approver_id) = match request_target(&headers, path, correlation_id) {
        Ok(target) => target,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        request_id = %request_id,
        approver_id = %approver_id,
        "Processing leave rejection"
    );

    let remarks = match review_payload(&body, correlation_id) {
        Ok(review) => review.remarks,
        Err(response) => return response,
    };
    let result = state
        .leave()
        .reject(request_id, &approver_id, remarks, Utc::now());
    respond(correlation_id, "Leave rejection", StatusCode::OK, result)
}

/// Handler for DELETE /leave/requests/:id.
///
/// Only the owner may withdraw a request, and only while it is pending.
async fn delete_request_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let (request_id, actor_id) = match request_target(&headers, path, correlation_id) {
        Ok(target) => target,
        Err(response) => return response,
    };

    match state
        .leave()
        .delete(request_id, &actor_id, Utc::now().date_naive())
    {
        Ok(_) => {
            info!(
                correlation_id = %correlation_id,
                request_id = %request_id,
                "Leave request deleted"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => engine_error_response(err, correlation_id, "Leave deletion"),
    }
}

/// Handler for PUT /employees/:id.
async fn register_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    payload: Result<Json<RegisterEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let result = state.leave().register_employee(
        &employee_id,
        &request.name,
        request.date_of_joining,
        Utc::now().date_naive(),
    );
    respond(correlation_id, "Employee registration", StatusCode::OK, result)
}

/// Handler for GET /employees/:id/balance.
async fn balance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state
        .leave()
        .balance(&employee_id, Utc::now().date_naive());
    respond(correlation_id, "Balance lookup", StatusCode::OK, result)
}

/// Handler for GET /employees/:id/summary?year=.
async fn summary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let year = match query_year(query, correlation_id) {
        Ok(year) => year,
        Err(response) => return response,
    };

    let result = state.leave().summary(&employee_id, year);
    respond(correlation_id, "Leave summary", StatusCode::OK, result)
}

/// Handler for GET /holidays?year=.
async fn list_holidays_handler(
    State(state): State<AppState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let year = match query_year(query, correlation_id) {
        Ok(year) => year,
        Err(response) => return response,
    };

    let result = state.holidays().list_for_year(year);
    respond(correlation_id, "Holiday listing", StatusCode::OK, result)
}

/// Handler for POST /holidays.
async fn create_holiday_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewHoliday>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let new = match payload {
        Ok(Json(new)) => new,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let result = state.holidays().create(new);
    respond(correlation_id, "Holiday creation", StatusCode::CREATED, result)
}

/// Handler for DELETE /holidays/:id.
async fn delete_holiday_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let holiday_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return path_rejection_response(rejection, correlation_id),
    };

    match state.holidays().delete(holiday_id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_error_response(err, correlation_id, "Holiday deletion"),
    }
}

/// Reads the acting employee from the `X-Employee-Id` header.
fn acting_employee(headers: &HeaderMap, correlation_id: Uuid) -> Result<String, Response> {
    let value = headers
        .get(EMPLOYEE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match value {
        Some(id) => Ok(id.to_string()),
        None => {
            warn!(correlation_id = %correlation_id, "Missing X-Employee-Id header");
            Err(json_response(
                StatusCode::UNAUTHORIZED,
                ApiError::missing_employee_id(),
            ))
        }
    }
}

/// Resolves the request id from the path and the actor from the header.
fn request_target(
    headers: &HeaderMap,
    path: Result<Path<Uuid>, PathRejection>,
    correlation_id: Uuid,
) -> Result<(Uuid, String), Response> {
    let request_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return Err(path_rejection_response(rejection, correlation_id)),
    };
    let actor_id = acting_employee(headers, correlation_id)?;
    Ok((request_id, actor_id))
}

/// Parses an optional review body. An empty body means no remarks; anything
/// else must be a valid [`ReviewRequest`].
fn review_payload(body: &Bytes, correlation_id: Uuid) -> Result<ReviewRequest, Response> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReviewRequest::default());
    }

    serde_json::from_slice(body).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Invalid review body"
        );
        let error = if err.is_data() {
            ApiError::validation_error(err.to_string())
        } else {
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        };
        json_response(StatusCode::BAD_REQUEST, error)
    })
}

/// The requested year, defaulting to the current one.
fn query_year(
    query: Result<Query<YearQuery>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<i32, Response> {
    match query {
        Ok(Query(YearQuery { year })) => Ok(year.unwrap_or_else(|| Utc::now().year())),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            Err(json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            ))
        }
    }
}

/// Renders the outcome of a service call, logging it under `operation`.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &str,
    status: StatusCode,
    result: EngineResult<T>,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                status = status.as_u16(),
                "Request completed successfully"
            );
            json_response(status, body)
        }
        Err(err) => engine_error_response(err, correlation_id, operation),
    }
}

fn engine_error_response(
    err: crate::error::EngineError,
    correlation_id: Uuid,
    operation: &str,
) -> Response {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn path_rejection_response(rejection: PathRejection, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Invalid path parameter"
    );
    json_response(
        StatusCode::BAD_REQUEST,
        ApiError::with_details("INVALID_ID", "Invalid identifier", rejection.body_text()),
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
