use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::engine::{clash, lifecycle};
use crate::model::absence::AbsenceType;
use crate::model::request::RequestStatus;
use crate::repo;

#[derive(Deserialize, ToSchema)]
pub struct CreateRequest {
    #[serde(rename = "type")]
    #[schema(example = "holiday")]
    pub kind: AbsenceType,
    #[schema(example = "2026-06-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-06-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RequestFilter {
    /// Filter by lifecycle status (pending, approved, rejected,
    /// cancel_pending, cancelled)
    #[param(example = "pending")]
    pub status: Option<String>,
}

fn parse_status(raw: Option<&str>) -> actix_web::Result<Option<RequestStatus>> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse::<RequestStatus>()
            .map(Some)
            .map_err(|_| actix_web::error::ErrorBadRequest("Invalid status filter")),
    }
}

/* =========================
Submit request (staff)
========================= */
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body(
        content = CreateRequest,
        description = "Time-off request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Request submitted", body = crate::model::request::HolidayRequest),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn create_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateRequest>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;

    let request = lifecycle::submit(
        pool.get_ref(),
        employee_id,
        payload.kind,
        payload.start_date,
        payload.end_date,
        Utc::now(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Request ledger
========================= */
/// Admins see the whole ledger; staff only their own requests.
#[utoipa::path(
    get,
    path = "/api/requests",
    params(RequestFilter),
    responses(
        (status = 200, description = "Requests in submission order", body = Vec<crate::model::request::HolidayRequest>),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn list_requests(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<RequestFilter>,
) -> actix_web::Result<impl Responder> {
    let status = parse_status(query.status.as_deref())?;

    let employee_id = if auth.is_admin() {
        None
    } else {
        Some(auth.require_employee()?)
    };

    let requests = repo::requests::get_requests(pool.get_ref(), status, employee_id).await?;

    Ok(HttpResponse::Ok().json(requests))
}

#[utoipa::path(
    get,
    path = "/api/requests/{request_id}",
    params(
        ("request_id", Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = crate::model::request::HolidayRequest),
        (status = 404, description = "Request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn get_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let request_id = path.into_inner();

    let request = repo::requests::get_request(pool.get_ref(), request_id).await?;

    let Some(request) = request else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Request not found"
        })));
    };

    if !auth.is_admin() && auth.employee_id != Some(request.employee_id) {
        return Err(actix_web::error::ErrorForbidden("Not your request"));
    }

    Ok(HttpResponse::Ok().json(request))
}

/// Owner edit of a still-pending request.
#[utoipa::path(
    put,
    path = "/api/requests/{request_id}",
    params(
        ("request_id", Path, description = "Request ID")
    ),
    request_body = CreateRequest,
    responses(
        (status = 200, description = "Request updated", body = Object, example = json!({
            "message": "Request updated"
        })),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "No longer pending")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn edit_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<CreateRequest>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;
    let request_id = path.into_inner();

    let request = repo::requests::get_request(pool.get_ref(), request_id).await?;
    let Some(request) = request else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Request not found"
        })));
    };
    if request.employee_id != employee_id {
        return Err(actix_web::error::ErrorForbidden("Not your request"));
    }

    lifecycle::edit_pending(
        pool.get_ref(),
        request_id,
        payload.kind,
        payload.start_date,
        payload.end_date,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Request updated"
    })))
}

/* =========================
Review decisions (admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/requests/{request_id}/approve",
    params(
        ("request_id", Path, description = "ID of the request to approve")
    ),
    responses(
        (status = 200, description = "Request approved", body = Object, example = json!({
            "message": "Request approved",
            "days_applied": 5
        })),
        (status = 400, description = "No weekdays in range"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Not pending any more")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn approve_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    let days_applied = lifecycle::approve(pool.get_ref(), request_id, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Request approved",
        "days_applied": days_applied
    })))
}

#[utoipa::path(
    put,
    path = "/api/requests/{request_id}/reject",
    params(
        ("request_id", Path, description = "ID of the request to reject")
    ),
    responses(
        (status = 200, description = "Request rejected", body = Object, example = json!({
            "message": "Request rejected"
        })),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Not pending any more")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn reject_request(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    lifecycle::reject(pool.get_ref(), request_id, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Request rejected"
    })))
}

/* =========================
Cancellation workflow
========================= */

/// Staff ask to cancel an approved request. Denied once the holiday has
/// passed or when it starts within the next four weeks.
#[utoipa::path(
    post,
    path = "/api/requests/{request_id}/cancel",
    params(
        ("request_id", Path, description = "ID of the approved request")
    ),
    responses(
        (status = 200, description = "Cancellation requested", body = Object, example = json!({
            "message": "Cancellation requested"
        })),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Not approved, already passed, or inside the notice window")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn request_cancellation(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee()?;
    let request_id = path.into_inner();

    let request = repo::requests::get_request(pool.get_ref(), request_id).await?;
    let Some(request) = request else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Request not found"
        })));
    };
    if request.employee_id != employee_id {
        return Err(actix_web::error::ErrorForbidden("Not your request"));
    }

    lifecycle::request_cancellation(pool.get_ref(), request_id, Utc::now().date_naive()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Cancellation requested"
    })))
}

#[utoipa::path(
    put,
    path = "/api/requests/{request_id}/cancel/approve",
    params(
        ("request_id", Path, description = "ID of the cancel-pending request")
    ),
    responses(
        (status = 200, description = "Cancellation approved", body = Object, example = json!({
            "message": "Cancellation approved",
            "days_removed": 5
        })),
        (status = 404, description = "Request not found"),
        (status = 409, description = "No cancellation pending")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn approve_cancellation(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    let days_removed = lifecycle::approve_cancellation(pool.get_ref(), request_id, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Cancellation approved",
        "days_removed": days_removed
    })))
}

#[utoipa::path(
    put,
    path = "/api/requests/{request_id}/cancel/decline",
    params(
        ("request_id", Path, description = "ID of the cancel-pending request")
    ),
    responses(
        (status = 200, description = "Cancellation declined", body = Object, example = json!({
            "message": "Cancellation declined"
        })),
        (status = 404, description = "Request not found"),
        (status = 409, description = "No cancellation pending")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn decline_cancellation(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let request_id = path.into_inner();

    lifecycle::decline_cancellation(pool.get_ref(), request_id, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Cancellation declined"
    })))
}

/* =========================
Clash report (admin)
========================= */

/// Scores the whole pending queue against booked absences and against
/// itself. Requests absent from the map have no clash.
#[utoipa::path(
    get,
    path = "/api/requests/clashes",
    responses(
        (status = 200, description = "request id -> clashing employee names", body = Object, example = json!({
            "7": ["Jane Doe"],
            "9": ["Jane Doe", "Sam Park"]
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Requests"
)]
pub async fn clash_report(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let clashes = clash::clash_report(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(clashes))
}
