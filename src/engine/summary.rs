//! Per-employee balance summaries derived from the absence store. Only
//! holiday days draw the entitlement down; sick and personal days are counted
//! but free.

use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::model::absence::{AbsenceRecord, AbsenceType};
use crate::model::employee::Employee;
use crate::repo;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "employee_id": 1,
    "name": "Jane Doe",
    "store": "Downtown",
    "holiday": 12,
    "sick": 2,
    "personal": 1,
    "entitlement": 28,
    "remaining": 16
}))]
pub struct BalanceSummary {
    pub employee_id: i64,
    pub name: String,
    pub store: String,
    pub holiday: i64,
    pub sick: i64,
    pub personal: i64,
    pub entitlement: i64,
    /// entitlement minus booked holiday days; goes negative when over-booked.
    pub remaining: i64,
}

pub fn summarize(employee: &Employee, absences: &[AbsenceRecord]) -> BalanceSummary {
    let mut holiday = 0;
    let mut sick = 0;
    let mut personal = 0;

    for record in absences.iter().filter(|a| a.employee_id == employee.id) {
        match record.kind {
            AbsenceType::Holiday => holiday += 1,
            AbsenceType::Sick => sick += 1,
            AbsenceType::Personal => personal += 1,
        }
    }

    BalanceSummary {
        employee_id: employee.id,
        name: employee.name.clone(),
        store: employee.store.clone(),
        holiday,
        sick,
        personal,
        entitlement: employee.entitlement,
        remaining: employee.entitlement - holiday,
    }
}

pub async fn balances(pool: &SqlitePool) -> Result<Vec<BalanceSummary>> {
    let employees = repo::employees::get_employees(pool).await?;
    let absences = repo::absences::get_absences(pool, None).await?;

    Ok(employees.iter().map(|e| summarize(e, &absences)).collect())
}

pub async fn balance_for(pool: &SqlitePool, employee_id: i64) -> Result<BalanceSummary> {
    let employee = repo::employees::get_employee(pool, employee_id)
        .await?
        .ok_or(Error::NotFound("employee"))?;
    let absences = repo::absences::get_absences(pool, Some(employee_id)).await?;

    Ok(summarize(&employee, &absences))
}
