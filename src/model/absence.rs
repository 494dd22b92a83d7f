use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Category of a booked day off. Only `Holiday` draws down the annual
/// entitlement; sick and personal days are tracked but not deducted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AbsenceType {
    Holiday,
    Sick,
    Personal,
}

/// A single day off for a single employee. Unique per (employee_id, date);
/// re-booking the same day overwrites the type.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AbsenceRecord {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "2026-03-10", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "holiday")]
    pub kind: AbsenceType,
}
