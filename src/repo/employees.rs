use sqlx::{Executor, Sqlite};

use crate::error::Result;
use crate::model::employee::Employee;

pub async fn insert_employee<'e, E>(ex: E, name: &str, store: &str, entitlement: i64) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO employees (name, store, entitlement) VALUES (?, ?, ?)")
        .bind(name)
        .bind(store)
        .bind(entitlement)
        .execute(ex)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_employees<'e, E>(ex: E) -> Result<Vec<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let employees = sqlx::query_as::<_, Employee>(
        "SELECT id, name, store, entitlement FROM employees ORDER BY name ASC",
    )
    .fetch_all(ex)
    .await?;

    Ok(employees)
}

pub async fn get_employee<'e, E>(ex: E, id: i64) -> Result<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, name, store, entitlement FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(employee)
}

/// Partial update: absent fields keep their current value.
pub async fn update_employee<'e, E>(
    ex: E,
    id: i64,
    name: Option<&str>,
    store: Option<&str>,
    entitlement: Option<i64>,
) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE employees
        SET name = COALESCE(?, name),
            store = COALESCE(?, store),
            entitlement = COALESCE(?, entitlement)
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(store)
    .bind(entitlement)
    .bind(id)
    .execute(ex)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes the employee row; absences and holiday requests go with it via the
/// foreign-key cascades.
pub async fn delete_employee<'e, E>(ex: E, id: i64) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}
