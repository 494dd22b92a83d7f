//! Same-store overlap scoring for the pending-request queue.
//!
//! Two sources of clash: a store-mate's already-booked absence falling inside
//! the requested range, and another pending request from the same store whose
//! range overlaps. Cancellation requests free capacity up rather than consume
//! it, so they are never scored.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use sqlx::SqlitePool;

use crate::error::Result;
use crate::model::absence::AbsenceRecord;
use crate::model::employee::Employee;
use crate::model::request::{HolidayRequest, RequestStatus};
use crate::repo;

/// Maps each clashing pending request to the deduplicated names of the
/// employees it collides with. Requests without clashes carry no key.
///
/// O(P² + P·A); fine at the handful-of-stores scale this runs at.
pub fn detect_clashes(
    pending: &[HolidayRequest],
    absences: &[AbsenceRecord],
    employees: &[Employee],
) -> BTreeMap<i64, BTreeSet<String>> {
    let by_id: HashMap<i64, &Employee> = employees.iter().map(|e| (e.id, e)).collect();

    let mut clashes = BTreeMap::new();

    for req in pending.iter().filter(|r| r.status == RequestStatus::Pending) {
        let Some(emp) = by_id.get(&req.employee_id) else {
            continue;
        };

        let mut names = BTreeSet::new();

        // Booked absences of store-mates inside the requested range. The
        // requester's own bookings never count against them here.
        for other in employees
            .iter()
            .filter(|e| e.store == emp.store && e.id != emp.id)
        {
            let overlaps = absences.iter().any(|a| {
                a.employee_id == other.id && a.date >= req.start_date && a.date <= req.end_date
            });
            if overlaps {
                names.insert(other.name.clone());
            }
        }

        // Other pending requests competing for the same store's coverage.
        for other_req in pending.iter().filter(|r| r.status == RequestStatus::Pending) {
            if other_req.id == req.id {
                continue;
            }
            let Some(other_emp) = by_id.get(&other_req.employee_id) else {
                continue;
            };
            if other_emp.store != emp.store {
                continue;
            }
            if req.start_date <= other_req.end_date && req.end_date >= other_req.start_date {
                names.insert(other_emp.name.clone());
            }
        }

        if !names.is_empty() {
            clashes.insert(req.id, names);
        }
    }

    clashes
}

/// Loads the pending queue and scores it against the current calendar.
pub async fn clash_report(pool: &SqlitePool) -> Result<BTreeMap<i64, BTreeSet<String>>> {
    let pending = repo::requests::get_requests(pool, Some(RequestStatus::Pending), None).await?;
    let absences = repo::absences::get_absences(pool, None).await?;
    let employees = repo::employees::get_employees(pool).await?;

    Ok(detect_clashes(&pending, &absences, &employees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::absence::AbsenceType;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: i64, name: &str, store: &str) -> Employee {
        Employee {
            id,
            name: name.into(),
            store: store.into(),
            entitlement: 28,
        }
    }

    fn request(
        id: i64,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        status: RequestStatus,
    ) -> HolidayRequest {
        HolidayRequest {
            id,
            employee_id,
            kind: AbsenceType::Holiday,
            start_date: start,
            end_date: end,
            status,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
            reviewed_at: None,
        }
    }

    #[test]
    fn booked_absence_of_store_mate_flags_request() {
        let employees = vec![
            employee(1, "A", "Downtown"),
            employee(2, "B", "Downtown"),
        ];
        let absences = vec![AbsenceRecord {
            employee_id: 1,
            date: date(2026, 3, 10),
            kind: AbsenceType::Holiday,
        }];
        let pending = vec![request(
            10,
            2,
            date(2026, 3, 9),
            date(2026, 3, 11),
            RequestStatus::Pending,
        )];

        let clashes = detect_clashes(&pending, &absences, &employees);

        assert_eq!(clashes.len(), 1);
        assert_eq!(
            clashes.get(&10).unwrap().iter().collect::<Vec<_>>(),
            vec!["A"]
        );
    }

    #[test]
    fn overlapping_pending_requests_flag_each_other() {
        let employees = vec![
            employee(1, "A", "Downtown"),
            employee(2, "B", "Downtown"),
        ];
        let pending = vec![
            request(1, 1, date(2026, 5, 4), date(2026, 5, 8), RequestStatus::Pending),
            request(2, 2, date(2026, 5, 6), date(2026, 5, 12), RequestStatus::Pending),
        ];

        let clashes = detect_clashes(&pending, &[], &employees);

        assert!(clashes.get(&1).unwrap().contains("B"));
        assert!(clashes.get(&2).unwrap().contains("A"));
    }

    #[test]
    fn different_store_never_clashes() {
        let employees = vec![
            employee(1, "A", "Downtown"),
            employee(2, "B", "Riverside"),
        ];
        let absences = vec![AbsenceRecord {
            employee_id: 1,
            date: date(2026, 3, 10),
            kind: AbsenceType::Sick,
        }];
        let pending = vec![
            request(1, 1, date(2026, 3, 9), date(2026, 3, 11), RequestStatus::Pending),
            request(2, 2, date(2026, 3, 9), date(2026, 3, 11), RequestStatus::Pending),
        ];

        let clashes = detect_clashes(&pending, &absences, &employees);

        assert!(clashes.is_empty());
    }

    #[test]
    fn non_pending_requests_are_not_scored() {
        let employees = vec![
            employee(1, "A", "Downtown"),
            employee(2, "B", "Downtown"),
        ];
        let pending = vec![
            request(1, 1, date(2026, 5, 4), date(2026, 5, 8), RequestStatus::CancelPending),
            request(2, 2, date(2026, 5, 6), date(2026, 5, 12), RequestStatus::Pending),
        ];

        let clashes = detect_clashes(&pending, &[], &employees);

        // The cancel_pending request neither receives nor contributes a clash.
        assert!(clashes.get(&1).is_none());
        assert!(clashes.get(&2).is_none());
    }

    #[test]
    fn own_absence_does_not_count_but_own_other_request_does() {
        let employees = vec![employee(1, "A", "Downtown")];
        let absences = vec![AbsenceRecord {
            employee_id: 1,
            date: date(2026, 3, 10),
            kind: AbsenceType::Holiday,
        }];
        let one = vec![request(
            1,
            1,
            date(2026, 3, 9),
            date(2026, 3, 11),
            RequestStatus::Pending,
        )];
        assert!(detect_clashes(&one, &absences, &employees).is_empty());

        // Two overlapping pending requests from the same employee do flag
        // each other; only the identical request id is skipped.
        let two = vec![
            request(1, 1, date(2026, 3, 9), date(2026, 3, 11), RequestStatus::Pending),
            request(2, 1, date(2026, 3, 11), date(2026, 3, 13), RequestStatus::Pending),
        ];
        let clashes = detect_clashes(&two, &[], &employees);
        assert!(clashes.get(&1).unwrap().contains("A"));
        assert!(clashes.get(&2).unwrap().contains("A"));
    }

    #[test]
    fn names_are_deduplicated() {
        let employees = vec![
            employee(1, "A", "Downtown"),
            employee(2, "B", "Downtown"),
        ];
        // B both has a booked absence in range and an overlapping pending
        // request; A's report still names B once.
        let absences = vec![AbsenceRecord {
            employee_id: 2,
            date: date(2026, 3, 10),
            kind: AbsenceType::Holiday,
        }];
        let pending = vec![
            request(1, 1, date(2026, 3, 9), date(2026, 3, 11), RequestStatus::Pending),
            request(2, 2, date(2026, 3, 11), date(2026, 3, 12), RequestStatus::Pending),
        ];

        let clashes = detect_clashes(&pending, &absences, &employees);

        assert_eq!(clashes.get(&1).unwrap().len(), 1);
    }
}
