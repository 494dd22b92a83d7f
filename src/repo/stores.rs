use sqlx::{Executor, Sqlite};

use crate::error::Result;
use crate::model::store::Store;

pub async fn get_stores<'e, E>(ex: E) -> Result<Vec<Store>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let stores = sqlx::query_as::<_, Store>("SELECT name FROM stores ORDER BY name ASC")
        .fetch_all(ex)
        .await?;

    Ok(stores)
}

pub async fn insert_store<'e, E>(ex: E, name: &str) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("INSERT INTO stores (name) VALUES (?)")
        .bind(name)
        .execute(ex)
        .await?;

    Ok(())
}

/// Removing a store leaves employees that still name it untouched; it only
/// stops showing up as a grouping choice.
pub async fn delete_store<'e, E>(ex: E, name: &str) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM stores WHERE name = ?")
        .bind(name)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}
