use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::absence::AbsenceType;

/// Lifecycle state of a holiday request. The only legal moves are the ones
/// encoded in [`RequestAction::transition`]; everything else is a
/// state-precondition failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    sqlx::Type, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    CancelPending,
    Cancelled,
}

/// Admin/staff decisions that move a request between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Approve,
    Reject,
    RequestCancel,
    ApproveCancel,
    DeclineCancel,
}

impl RequestAction {
    /// The full transition table: (required current status, resulting status).
    ///
    /// ```text
    /// pending --approve--> approved --request_cancel--> cancel_pending --approve_cancel--> cancelled
    /// pending --reject-->  rejected
    /// cancel_pending --decline_cancel--> approved
    /// ```
    pub const fn transition(self) -> (RequestStatus, RequestStatus) {
        match self {
            RequestAction::Approve => (RequestStatus::Pending, RequestStatus::Approved),
            RequestAction::Reject => (RequestStatus::Pending, RequestStatus::Rejected),
            RequestAction::RequestCancel => (RequestStatus::Approved, RequestStatus::CancelPending),
            RequestAction::ApproveCancel => (RequestStatus::CancelPending, RequestStatus::Cancelled),
            RequestAction::DeclineCancel => (RequestStatus::CancelPending, RequestStatus::Approved),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "employee_id": 1,
    "type": "holiday",
    "start_date": "2026-03-09",
    "end_date": "2026-03-11",
    "status": "pending",
    "created_at": "2026-02-01T09:30:00Z",
    "reviewed_at": null
}))]
pub struct HolidayRequest {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub employee_id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    #[schema(example = "holiday")]
    pub kind: AbsenceType,
    #[schema(example = "2026-03-09", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-03-11", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "pending")]
    pub status: RequestStatus,
    #[schema(example = "2026-02-01T09:30:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
    #[schema(example = "2026-02-02T14:00:00Z", format = "date-time", value_type = Option<String>)]
    pub reviewed_at: Option<DateTime<Utc>>,
}
