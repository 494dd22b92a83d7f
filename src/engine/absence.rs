//! Direct admin edits to the absence store, bypassing the request workflow.
//! The calendar invariant still holds: only weekdays can carry a record.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::engine::lifecycle::is_weekday;
use crate::error::{Error, Result};
use crate::model::absence::AbsenceType;
use crate::repo;

/// Books (or re-types) a single day for an employee.
pub async fn set_absence(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
    kind: AbsenceType,
) -> Result<()> {
    if !is_weekday(date) {
        return Err(Error::EmptyRange);
    }

    repo::employees::get_employee(pool, employee_id)
        .await?
        .ok_or(Error::NotFound("employee"))?;

    repo::absences::upsert_absence(pool, employee_id, date, kind).await?;

    Ok(())
}

pub async fn clear_absence(pool: &SqlitePool, employee_id: i64, date: NaiveDate) -> Result<()> {
    let removed = repo::absences::delete_absence(pool, employee_id, date).await?;
    if removed == 0 {
        return Err(Error::NotFound("absence"));
    }

    Ok(())
}
