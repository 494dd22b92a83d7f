//! Holiday-request lifecycle. A request is submitted by staff, reviewed by an
//! admin, and (once approved) may go through a staff-initiated cancellation
//! that needs its own admin sign-off. Approval expands the requested range
//! into weekday absence records; cancellation approval removes them again.
//!
//! Every transition re-checks the expected status in the UPDATE itself, so a
//! decision that races another admin fails with `StaleState` instead of being
//! applied twice.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{CancellationDenied, Error, Result};
use crate::model::absence::AbsenceType;
use crate::model::request::{HolidayRequest, RequestAction, RequestStatus};
use crate::repo;

/// Minimum lead time between a cancellation ask and the holiday's start.
const NOTICE_WINDOW_WEEKS: i64 = 4;

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Expands an inclusive date range into its Monday-Friday days, ascending.
pub fn expand_weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        if is_weekday(day) {
            days.push(day);
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// An approved request may only be cancelled while it still lies entirely in
/// the future and its start is more than four weeks out.
pub fn check_cancellation_window(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<()> {
    if end <= today {
        return Err(Error::CancellationNotAllowed(CancellationDenied::AlreadyPassed));
    }
    if start <= today + Duration::weeks(NOTICE_WINDOW_WEEKS) {
        return Err(Error::CancellationNotAllowed(
            CancellationDenied::InsideNoticeWindow,
        ));
    }
    Ok(())
}

async fn load_request(pool: &SqlitePool, id: i64) -> Result<HolidayRequest> {
    repo::requests::get_request(pool, id)
        .await?
        .ok_or(Error::NotFound("request"))
}

fn require_status(request: &HolidayRequest, expected: RequestStatus) -> Result<()> {
    if request.status != expected {
        return Err(Error::StatePrecondition {
            expected,
            found: request.status,
        });
    }
    Ok(())
}

/// Files a new pending request. No balance check happens here: the admin
/// reviewing the queue is the one who weighs entitlement.
pub async fn submit(
    pool: &SqlitePool,
    employee_id: i64,
    kind: AbsenceType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<HolidayRequest> {
    if start_date > end_date {
        return Err(Error::InvalidRange);
    }

    repo::employees::get_employee(pool, employee_id)
        .await?
        .ok_or(Error::NotFound("employee"))?;

    let request =
        repo::requests::insert_request(pool, employee_id, kind, start_date, end_date, now).await?;

    info!(request_id = request.id, employee_id, "Holiday request submitted");

    Ok(request)
}

/// Approves a pending request: writes one absence record per weekday in range
/// and flips the status, all in one transaction. Days already booked are
/// overwritten with the request's type. Returns the number of days applied.
pub async fn approve(pool: &SqlitePool, request_id: i64, now: DateTime<Utc>) -> Result<usize> {
    let request = load_request(pool, request_id).await?;
    let (from, to) = RequestAction::Approve.transition();
    require_status(&request, from)?;

    let days = expand_weekdays(request.start_date, request.end_date);
    if days.is_empty() {
        return Err(Error::EmptyRange);
    }

    let mut tx = pool.begin().await?;

    let affected =
        repo::requests::update_request_status(&mut *tx, request_id, from, to, Some(now)).await?;
    if affected == 0 {
        // Someone else decided this request between our read and write.
        return Err(Error::StaleState);
    }

    for day in &days {
        repo::absences::upsert_absence(&mut *tx, request.employee_id, *day, request.kind).await?;
    }

    tx.commit().await?;

    info!(
        request_id,
        employee_id = request.employee_id,
        days = days.len(),
        "Holiday request approved"
    );

    Ok(days.len())
}

pub async fn reject(pool: &SqlitePool, request_id: i64, now: DateTime<Utc>) -> Result<()> {
    let request = load_request(pool, request_id).await?;
    let (from, to) = RequestAction::Reject.transition();
    require_status(&request, from)?;

    let affected =
        repo::requests::update_request_status(pool, request_id, from, to, Some(now)).await?;
    if affected == 0 {
        return Err(Error::StaleState);
    }

    info!(request_id, "Holiday request rejected");

    Ok(())
}

/// Staff ask to cancel an approved request. Allowed only outside the notice
/// window; the absence records stay in place until an admin approves the
/// cancellation.
pub async fn request_cancellation(
    pool: &SqlitePool,
    request_id: i64,
    today: NaiveDate,
) -> Result<()> {
    let request = load_request(pool, request_id).await?;
    let (from, to) = RequestAction::RequestCancel.transition();
    require_status(&request, from)?;
    check_cancellation_window(request.start_date, request.end_date, today)?;

    let affected = repo::requests::update_request_status(pool, request_id, from, to, None).await?;
    if affected == 0 {
        return Err(Error::StaleState);
    }

    info!(request_id, "Cancellation requested");

    Ok(())
}

/// Removes the absence record for every weekday in range and marks the
/// request cancelled, transactionally. Days already removed by a direct admin
/// edit are skipped; the deletion is idempotent. Returns the number of
/// records actually removed.
pub async fn approve_cancellation(
    pool: &SqlitePool,
    request_id: i64,
    now: DateTime<Utc>,
) -> Result<usize> {
    let request = load_request(pool, request_id).await?;
    let (from, to) = RequestAction::ApproveCancel.transition();
    require_status(&request, from)?;

    let days = expand_weekdays(request.start_date, request.end_date);

    let mut tx = pool.begin().await?;

    let affected =
        repo::requests::update_request_status(&mut *tx, request_id, from, to, Some(now)).await?;
    if affected == 0 {
        return Err(Error::StaleState);
    }

    let mut removed = 0usize;
    for day in &days {
        removed += repo::absences::delete_absence(&mut *tx, request.employee_id, *day).await?
            as usize;
    }

    tx.commit().await?;

    info!(request_id, removed, "Cancellation approved");

    Ok(removed)
}

/// Turns a cancellation ask down: the request goes back to approved and its
/// absence records (which were never touched) stand.
pub async fn decline_cancellation(
    pool: &SqlitePool,
    request_id: i64,
    now: DateTime<Utc>,
) -> Result<()> {
    let request = load_request(pool, request_id).await?;
    let (from, to) = RequestAction::DeclineCancel.transition();
    require_status(&request, from)?;

    let affected =
        repo::requests::update_request_status(pool, request_id, from, to, Some(now)).await?;
    if affected == 0 {
        return Err(Error::StaleState);
    }

    info!(request_id, "Cancellation declined");

    Ok(())
}

/// Lets the owner rework a request that has not been reviewed yet. Ownership
/// is checked at the API layer; here only the lifecycle state matters.
pub async fn edit_pending(
    pool: &SqlitePool,
    request_id: i64,
    kind: AbsenceType,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<()> {
    if start_date > end_date {
        return Err(Error::InvalidRange);
    }

    let request = load_request(pool, request_id).await?;
    require_status(&request, RequestStatus::Pending)?;

    let affected =
        repo::requests::update_pending_fields(pool, request_id, kind, start_date, end_date).await?;
    if affected == 0 {
        return Err(Error::StaleState);
    }

    Ok(())
}
