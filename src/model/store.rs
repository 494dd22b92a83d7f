use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A store is just a named grouping; clash detection only compares employees
/// within the same store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Store {
    #[schema(example = "Downtown")]
    pub name: String,
}
