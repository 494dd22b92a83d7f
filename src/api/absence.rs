use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::engine::absence;
use crate::model::absence::AbsenceType;
use crate::repo;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AbsenceFilter {
    /// Filter by employee ID (forced to the caller's own record for staff)
    #[param(example = 1)]
    pub employee_id: Option<i64>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpsertAbsence {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "2026-03-10", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    #[schema(example = "holiday")]
    pub kind: AbsenceType,
}

/* =========================
List absence records
========================= */
#[utoipa::path(
    get,
    path = "/api/absences",
    params(AbsenceFilter),
    responses(
        (status = 200, description = "Absence records", body = Vec<crate::model::absence::AbsenceRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn list_absences(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<AbsenceFilter>,
) -> actix_web::Result<impl Responder> {
    // Staff only ever see their own calendar.
    let employee_id = if auth.is_admin() {
        query.employee_id
    } else {
        Some(auth.require_employee()?)
    };

    let absences = repo::absences::get_absences(pool.get_ref(), employee_id).await?;

    Ok(HttpResponse::Ok().json(absences))
}

/* =========================
Direct calendar edits (admin)
========================= */

/// Books or re-types a single day, outside the request workflow.
#[utoipa::path(
    put,
    path = "/api/absences",
    request_body = UpsertAbsence,
    responses(
        (status = 200, description = "Absence recorded", body = Object, example = json!({
            "message": "Absence recorded"
        })),
        (status = 400, description = "Weekend date"),
        (status = 404, description = "Employee not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn upsert_absence(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<UpsertAbsence>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    absence::set_absence(pool.get_ref(), payload.employee_id, payload.date, payload.kind).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Absence recorded"
    })))
}

#[utoipa::path(
    delete,
    path = "/api/absences/{employee_id}/{date}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("date", Path, description = "Calendar day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Absence removed", body = Object, example = json!({
            "message": "Absence removed"
        })),
        (status = 404, description = "No absence on that day")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Absence"
)]
pub async fn delete_absence(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<(i64, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let (employee_id, date) = path.into_inner();

    absence::clear_absence(pool.get_ref(), employee_id, date).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Absence removed"
    })))
}
