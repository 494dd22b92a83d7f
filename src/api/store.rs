use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::error::Error;
use crate::repo;

#[derive(Deserialize, ToSchema)]
pub struct CreateStore {
    #[schema(example = "Downtown")]
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/stores",
    responses(
        (status = 200, description = "Store list", body = Vec<crate::model::store::Store>)
    ),
    tag = "Store",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_stores(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let stores = repo::stores::get_stores(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(stores))
}

#[utoipa::path(
    post,
    path = "/api/stores",
    request_body = CreateStore,
    responses(
        (status = 200, description = "Store added", body = Object, example = json!({
            "message": "Store added"
        })),
        (status = 400, description = "Empty store name"),
        (status = 409, description = "Store already exists")
    ),
    tag = "Store",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_store(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateStore>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Store name must not be empty"
        })));
    }

    match repo::stores::insert_store(pool.get_ref(), name).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "message": "Store added"
        }))),
        Err(Error::Database(sqlx::Error::Database(db_err)))
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            Ok(HttpResponse::Conflict().json(json!({
                "message": "Store already exists"
            })))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/api/stores/{name}",
    params(
        ("name", Path, description = "Store name")
    ),
    responses(
        (status = 200, description = "Store removed", body = Object, example = json!({
            "message": "Store removed"
        })),
        (status = 404, description = "Store not found")
    ),
    tag = "Store",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_store(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let name = path.into_inner();

    let affected = repo::stores::delete_store(pool.get_ref(), &name).await?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Store not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Store removed"
    })))
}
