use chrono::NaiveDate;
use sqlx::{Executor, Sqlite};

use crate::error::Result;
use crate::model::absence::{AbsenceRecord, AbsenceType};

/// Last-write-wins upsert: booking a day that is already booked just
/// overwrites the type.
pub async fn upsert_absence<'e, E>(
    ex: E,
    employee_id: i64,
    date: NaiveDate,
    kind: AbsenceType,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO absences (employee_id, date, type)
        VALUES (?, ?, ?)
        ON CONFLICT(employee_id, date) DO UPDATE SET type = excluded.type
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(kind)
    .execute(ex)
    .await?;

    Ok(())
}

/// Returns rows affected; deleting a day that is not booked affects zero rows.
pub async fn delete_absence<'e, E>(ex: E, employee_id: i64, date: NaiveDate) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM absences WHERE employee_id = ? AND date = ?")
        .bind(employee_id)
        .bind(date)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}

pub async fn get_absences<'e, E>(ex: E, employee_id: Option<i64>) -> Result<Vec<AbsenceRecord>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut sql =
        String::from("SELECT employee_id, date, type FROM absences WHERE 1=1");
    if employee_id.is_some() {
        sql.push_str(" AND employee_id = ?");
    }
    sql.push_str(" ORDER BY date ASC");

    let mut query = sqlx::query_as::<_, AbsenceRecord>(&sql);
    if let Some(id) = employee_id {
        query = query.bind(id);
    }

    let absences = query.fetch_all(ex).await?;

    Ok(absences)
}
