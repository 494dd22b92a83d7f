use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Jane Doe",
        "store": "Downtown",
        "entitlement": 28
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Jane Doe")]
    pub name: String,

    /// Store the employee works at. Employees of the same store compete for
    /// the same coverage when time off overlaps.
    #[schema(example = "Downtown")]
    pub store: String,

    /// Annual holiday allowance in days.
    #[schema(example = 28)]
    pub entitlement: i64,
}
