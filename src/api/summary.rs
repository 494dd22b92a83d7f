use actix_web::{HttpResponse, Responder, web};
use sqlx::SqlitePool;

use crate::auth::auth::AuthUser;
use crate::engine::summary;

/// Balance summary per employee: days taken by type, entitlement and what is
/// left of it. Admins get every employee; staff just their own row.
#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "Balance summaries", body = Vec<crate::engine::summary::BalanceSummary>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "No employee profile")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Summary"
)]
pub async fn balances(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    let summaries = if auth.is_admin() {
        summary::balances(pool.get_ref()).await?
    } else {
        let employee_id = auth.require_employee()?;
        vec![summary::balance_for(pool.get_ref(), employee_id).await?]
    };

    Ok(HttpResponse::Ok().json(summaries))
}
