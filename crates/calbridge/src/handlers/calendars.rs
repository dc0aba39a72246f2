//! Calendar controller.
//!
//! Every business-layer failure is reported through [`ApiError`].

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use calbridge_core::backend::Page;
use calbridge_core::calendar::CalendarRecord;
use calbridge_core::json::{read_calendar_str, write_calendar, write_calendars};

use crate::{context::RequestContext, handlers::ApiError, state::AppState};

/// Page size header of `GET /calendars`.
pub const LIMIT_HEADER: &str = "x-oc-cal-limit";
/// Page start header of `GET /calendars`.
pub const OFFSET_HEADER: &str = "x-oc-cal-offset";

fn header_number(headers: &HeaderMap, name: &str) -> Option<usize> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

fn page_from_headers(headers: &HeaderMap) -> Page {
    Page::new(
        header_number(headers, LIMIT_HEADER),
        header_number(headers, OFFSET_HEADER),
    )
}

/// Parses a request body into a calendar record.
fn read_body(state: &AppState, body: &[u8]) -> Result<CalendarRecord, ApiError> {
    let text = std::str::from_utf8(body).map_err(|_| ApiError::invalid_body(&state.config))?;

    read_calendar_str(text, state.calendars.known_backends())
        .map_err(|e| ApiError::new(e.into(), &state.config))
}

/// List calendars (GET /calendars).
pub async fn list_calendars(
    State(state): State<AppState>,
    ctx: RequestContext,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let page = page_from_headers(&headers);
    let calendars = state
        .calendars
        .find_all(&ctx.user_id, page)
        .await
        .map_err(|e| ApiError::new(e, &state.config))?;

    tracing::debug!(
        request_id = %ctx.request_id,
        user = %ctx.user_id,
        count = calendars.len(),
        "Listed calendars"
    );

    Ok(Json(write_calendars(
        &calendars,
        &state.writer_context(&ctx.user_id),
    )))
}

/// Get a single calendar (GET /calendars/{calendar_id}).
pub async fn get_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(calendar_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let calendar = state
        .calendars
        .find(&calendar_id, &ctx.user_id)
        .await
        .map_err(|e| ApiError::new(e, &state.config))?;

    Ok(Json(write_calendar(
        &calendar,
        &state.writer_context(&ctx.user_id),
    )))
}

/// Create a calendar (POST /calendars).
///
/// User and owner are always the requesting user, whatever the body says.
pub async fn create_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let calendar = CalendarRecord {
        user_id: Some(ctx.user_id.clone()),
        owner_id: Some(ctx.user_id.clone()),
        ..read_body(&state, &body)?
    };

    let created = state
        .calendars
        .create(calendar, &ctx.user_id)
        .await
        .map_err(|e| ApiError::new(e, &state.config))?;

    tracing::info!(
        request_id = %ctx.request_id,
        calendar = ?created.public_uri(),
        "Created new calendar"
    );

    Ok((
        StatusCode::CREATED,
        Json(write_calendar(
            &created,
            &state.writer_context(&ctx.user_id),
        )),
    ))
}

/// Update a calendar (PUT /calendars/{calendar_id}).
pub async fn update_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(calendar_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let patch = CalendarRecord {
        user_id: Some(ctx.user_id.clone()),
        ..read_body(&state, &body)?
    };

    let updated = state
        .calendars
        .update(patch, &calendar_id, &ctx.user_id)
        .await
        .map_err(|e| ApiError::new(e, &state.config))?;

    tracing::info!(request_id = %ctx.request_id, calendar = %calendar_id, "Updated calendar");

    Ok((
        StatusCode::CREATED,
        Json(write_calendar(
            &updated,
            &state.writer_context(&ctx.user_id),
        )),
    ))
}

/// Partial updates are not supported (PATCH /calendars/{calendar_id}).
pub async fn patch_calendar(Path(calendar_id): Path<String>) -> StatusCode {
    tracing::debug!(calendar = %calendar_id, "Rejected PATCH");
    StatusCode::NOT_IMPLEMENTED
}

/// Delete a calendar (DELETE /calendars/{calendar_id}).
pub async fn delete_calendar(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(calendar_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .calendars
        .delete(&calendar_id, &ctx.user_id)
        .await
        .map_err(|e| ApiError::new(e, &state.config))?;

    tracing::info!(request_id = %ctx.request_id, calendar = %calendar_id, "Deleted calendar");

    Ok(StatusCode::NO_CONTENT)
}
