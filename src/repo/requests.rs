use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, Sqlite};

use crate::error::Result;
use crate::model::absence::AbsenceType;
use crate::model::request::{HolidayRequest, RequestStatus};

pub async fn insert_request<'e, E>(
    ex: E,
    employee_id: i64,
    kind: AbsenceType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    created_at: DateTime<Utc>,
) -> Result<HolidayRequest>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO holiday_requests (employee_id, type, start_date, end_date, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(kind)
    .bind(start_date)
    .bind(end_date)
    .bind(RequestStatus::Pending)
    .bind(created_at)
    .execute(ex)
    .await?;

    Ok(HolidayRequest {
        id: result.last_insert_rowid(),
        employee_id,
        kind,
        start_date,
        end_date,
        status: RequestStatus::Pending,
        created_at,
        reviewed_at: None,
    })
}

pub async fn get_request<'e, E>(ex: E, id: i64) -> Result<Option<HolidayRequest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let request = sqlx::query_as::<_, HolidayRequest>(
        r#"
        SELECT id, employee_id, type, start_date, end_date, status, created_at, reviewed_at
        FROM holiday_requests
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(request)
}

/// Request ledger in submission order, optionally narrowed by status and/or
/// employee.
pub async fn get_requests<'e, E>(
    ex: E,
    status: Option<RequestStatus>,
    employee_id: Option<i64>,
) -> Result<Vec<HolidayRequest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut sql = String::from(
        r#"
        SELECT id, employee_id, type, start_date, end_date, status, created_at, reviewed_at
        FROM holiday_requests
        WHERE 1=1
        "#,
    );
    if status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if employee_id.is_some() {
        sql.push_str(" AND employee_id = ?");
    }
    sql.push_str(" ORDER BY created_at ASC, id ASC");

    let mut query = sqlx::query_as::<_, HolidayRequest>(&sql);
    if let Some(s) = status {
        query = query.bind(s);
    }
    if let Some(id) = employee_id {
        query = query.bind(id);
    }

    let requests = query.fetch_all(ex).await?;

    Ok(requests)
}

/// Atomic conditional transition: the row only moves when it is still in the
/// expected status. Zero rows affected means a concurrent writer got there
/// first.
pub async fn update_request_status<'e, E>(
    ex: E,
    id: i64,
    from: RequestStatus,
    to: RequestStatus,
    reviewed_at: Option<DateTime<Utc>>,
) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = match reviewed_at {
        Some(at) => {
            sqlx::query(
                r#"
                UPDATE holiday_requests
                SET status = ?, reviewed_at = ?
                WHERE id = ? AND status = ?
                "#,
            )
            .bind(to)
            .bind(at)
            .bind(id)
            .bind(from)
            .execute(ex)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                UPDATE holiday_requests
                SET status = ?
                WHERE id = ? AND status = ?
                "#,
            )
            .bind(to)
            .bind(id)
            .bind(from)
            .execute(ex)
            .await?
        }
    };

    Ok(result.rows_affected())
}

/// In-place edit of a request that is still pending review.
pub async fn update_pending_fields<'e, E>(
    ex: E,
    id: i64,
    kind: AbsenceType,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE holiday_requests
        SET type = ?, start_date = ?, end_date = ?
        WHERE id = ? AND status = ?
        "#,
    )
    .bind(kind)
    .bind(start_date)
    .bind(end_date)
    .bind(id)
    .bind(RequestStatus::Pending)
    .execute(ex)
    .await?;

    Ok(result.rows_affected())
}
