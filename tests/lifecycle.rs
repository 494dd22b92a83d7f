mod common;

use common::{at, date, seed_employee, test_pool};
use holiday_tracker::engine::{absence, lifecycle};
use holiday_tracker::error::{CancellationDenied, Error};
use holiday_tracker::model::absence::AbsenceType;
use holiday_tracker::model::request::RequestStatus;
use holiday_tracker::repo;

#[tokio::test]
async fn approval_expands_range_into_weekday_absences() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    // Fri 2026-06-05 .. Mon 2026-06-08: the weekend in the middle is skipped.
    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 6, 5),
        date(2026, 6, 8),
        at(2026, 2, 1),
    )
    .await
    .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    let applied = lifecycle::approve(&pool, request.id, at(2026, 2, 2)).await.unwrap();
    assert_eq!(applied, 2);

    let absences = repo::absences::get_absences(&pool, Some(emp)).await.unwrap();
    let days: Vec<_> = absences.iter().map(|a| a.date).collect();
    assert_eq!(days, vec![date(2026, 6, 5), date(2026, 6, 8)]);
    assert!(absences.iter().all(|a| a.kind == AbsenceType::Holiday));

    let reviewed = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reviewed.status, RequestStatus::Approved);
    assert!(reviewed.reviewed_at.is_some());
}

#[tokio::test]
async fn weekend_only_range_cannot_be_approved() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    // Sat 2026-06-06 .. Sun 2026-06-07
    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 6, 6),
        date(2026, 6, 7),
        at(2026, 2, 1),
    )
    .await
    .unwrap();

    let err = lifecycle::approve(&pool, request.id, at(2026, 2, 2)).await.unwrap_err();
    assert!(matches!(err, Error::EmptyRange));

    // Nothing moved: still pending, calendar untouched.
    let current = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, RequestStatus::Pending);
    assert!(repo::absences::get_absences(&pool, Some(emp))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn second_review_of_the_same_request_loses() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 7, 6),
        date(2026, 7, 10),
        at(2026, 2, 1),
    )
    .await
    .unwrap();

    assert_eq!(lifecycle::approve(&pool, request.id, at(2026, 2, 2)).await.unwrap(), 5);

    let err = lifecycle::approve(&pool, request.id, at(2026, 2, 2)).await.unwrap_err();
    assert!(matches!(err, Error::StatePrecondition { .. }));

    let err = lifecycle::reject(&pool, request.id, at(2026, 2, 2)).await.unwrap_err();
    assert!(matches!(err, Error::StatePrecondition { .. }));

    // Exactly one application on the calendar.
    assert_eq!(
        repo::absences::get_absences(&pool, Some(emp)).await.unwrap().len(),
        5
    );
}

#[tokio::test]
async fn conditional_status_update_is_atomic() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 7, 6),
        date(2026, 7, 10),
        at(2026, 2, 1),
    )
    .await
    .unwrap();

    // The update-where-status-equals either claims the row or touches nothing;
    // a losing concurrent writer observes zero rows affected.
    let won = repo::requests::update_request_status(
        &pool,
        request.id,
        RequestStatus::Pending,
        RequestStatus::Approved,
        Some(at(2026, 2, 2)),
    )
    .await
    .unwrap();
    assert_eq!(won, 1);

    let lost = repo::requests::update_request_status(
        &pool,
        request.id,
        RequestStatus::Pending,
        RequestStatus::Approved,
        Some(at(2026, 2, 2)),
    )
    .await
    .unwrap();
    assert_eq!(lost, 0);
}

#[tokio::test]
async fn rejection_touches_no_absences() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Sick,
        date(2026, 7, 6),
        date(2026, 7, 10),
        at(2026, 2, 1),
    )
    .await
    .unwrap();

    lifecycle::reject(&pool, request.id, at(2026, 2, 2)).await.unwrap();

    let current = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, RequestStatus::Rejected);
    assert!(current.reviewed_at.is_some());
    assert!(repo::absences::get_absences(&pool, Some(emp))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn approval_overwrites_existing_booking_type() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    // Tue 2026-07-07 already booked as sick by a direct admin edit.
    absence::set_absence(&pool, emp, date(2026, 7, 7), AbsenceType::Sick)
        .await
        .unwrap();

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 7, 6),
        date(2026, 7, 8),
        at(2026, 2, 1),
    )
    .await
    .unwrap();
    lifecycle::approve(&pool, request.id, at(2026, 2, 2)).await.unwrap();

    let absences = repo::absences::get_absences(&pool, Some(emp)).await.unwrap();
    assert_eq!(absences.len(), 3);
    // Last write wins: the sick day became a holiday.
    assert!(absences.iter().all(|a| a.kind == AbsenceType::Holiday));
}

#[tokio::test]
async fn cancellation_round_trip_restores_the_calendar() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    // An unrelated booking that must survive the round trip.
    absence::set_absence(&pool, emp, date(2026, 6, 29), AbsenceType::Personal)
        .await
        .unwrap();

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 9, 7),
        date(2026, 9, 11),
        at(2026, 1, 1),
    )
    .await
    .unwrap();
    lifecycle::approve(&pool, request.id, at(2026, 1, 2)).await.unwrap();
    assert_eq!(
        repo::absences::get_absences(&pool, Some(emp)).await.unwrap().len(),
        6
    );

    // Well outside the 4-week notice window.
    lifecycle::request_cancellation(&pool, request.id, date(2026, 1, 5))
        .await
        .unwrap();
    let current = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, RequestStatus::CancelPending);

    let removed = lifecycle::approve_cancellation(&pool, request.id, at(2026, 1, 6))
        .await
        .unwrap();
    assert_eq!(removed, 5);

    let absences = repo::absences::get_absences(&pool, Some(emp)).await.unwrap();
    assert_eq!(absences.len(), 1);
    assert_eq!(absences[0].date, date(2026, 6, 29));

    let current = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, RequestStatus::Cancelled);
}

#[tokio::test]
async fn cancellation_inside_notice_window_is_denied() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 1, 15),
        date(2026, 1, 16),
        at(2025, 12, 1),
    )
    .await
    .unwrap();
    lifecycle::approve(&pool, request.id, at(2025, 12, 2)).await.unwrap();

    // 13 days before the start: too late to cancel.
    let err = lifecycle::request_cancellation(&pool, request.id, date(2026, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::CancellationNotAllowed(CancellationDenied::InsideNoticeWindow)
    ));

    let current = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, RequestStatus::Approved);
}

#[tokio::test]
async fn elapsed_request_cannot_be_cancelled() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2025, 11, 3),
        date(2025, 11, 7),
        at(2025, 10, 1),
    )
    .await
    .unwrap();
    lifecycle::approve(&pool, request.id, at(2025, 10, 2)).await.unwrap();

    let err = lifecycle::request_cancellation(&pool, request.id, date(2026, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::CancellationNotAllowed(CancellationDenied::AlreadyPassed)
    ));
}

#[tokio::test]
async fn declined_cancellation_reverts_to_approved() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 9, 7),
        date(2026, 9, 11),
        at(2026, 1, 1),
    )
    .await
    .unwrap();
    lifecycle::approve(&pool, request.id, at(2026, 1, 2)).await.unwrap();
    lifecycle::request_cancellation(&pool, request.id, date(2026, 1, 5))
        .await
        .unwrap();

    lifecycle::decline_cancellation(&pool, request.id, at(2026, 1, 6))
        .await
        .unwrap();

    let current = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.status, RequestStatus::Approved);

    // The booked days were never touched.
    assert_eq!(
        repo::absences::get_absences(&pool, Some(emp)).await.unwrap().len(),
        5
    );

    // Cancelling again later is still possible.
    lifecycle::request_cancellation(&pool, request.id, date(2026, 1, 7))
        .await
        .unwrap();
}

#[tokio::test]
async fn pending_requests_can_be_reworked_by_their_owner() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let request = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 8, 3),
        date(2026, 8, 7),
        at(2026, 2, 1),
    )
    .await
    .unwrap();

    lifecycle::edit_pending(
        &pool,
        request.id,
        AbsenceType::Personal,
        date(2026, 8, 4),
        date(2026, 8, 6),
    )
    .await
    .unwrap();

    let current = repo::requests::get_request(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.kind, AbsenceType::Personal);
    assert_eq!(current.start_date, date(2026, 8, 4));
    assert_eq!(current.end_date, date(2026, 8, 6));
    assert_eq!(current.status, RequestStatus::Pending);

    // Once reviewed, the edit window is gone.
    lifecycle::approve(&pool, request.id, at(2026, 2, 2)).await.unwrap();
    let err = lifecycle::edit_pending(
        &pool,
        request.id,
        AbsenceType::Holiday,
        date(2026, 8, 3),
        date(2026, 8, 7),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::StatePrecondition { .. }));
}

#[tokio::test]
async fn submission_validates_range_and_employee() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    let err = lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 8, 7),
        date(2026, 8, 3),
        at(2026, 2, 1),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::InvalidRange));

    let err = lifecycle::submit(
        &pool,
        9999,
        AbsenceType::Holiday,
        date(2026, 8, 3),
        date(2026, 8, 7),
        at(2026, 2, 1),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = lifecycle::edit_pending(
        &pool,
        1,
        AbsenceType::Holiday,
        date(2026, 8, 7),
        date(2026, 8, 3),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, Error::InvalidRange));
}

#[tokio::test]
async fn direct_calendar_edits_enforce_weekdays() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    // Sat 2026-06-06 can never carry an absence record.
    let err = absence::set_absence(&pool, emp, date(2026, 6, 6), AbsenceType::Holiday)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyRange));

    absence::set_absence(&pool, emp, date(2026, 6, 8), AbsenceType::Holiday)
        .await
        .unwrap();
    absence::clear_absence(&pool, emp, date(2026, 6, 8)).await.unwrap();

    // Clearing an empty day is a NotFound, not a silent no-op.
    let err = absence::clear_absence(&pool, emp, date(2026, 6, 8)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn deleting_an_employee_cascades() {
    let pool = test_pool().await;
    let emp = seed_employee(&pool, "Jane", "Downtown").await;

    absence::set_absence(&pool, emp, date(2026, 6, 8), AbsenceType::Holiday)
        .await
        .unwrap();
    lifecycle::submit(
        &pool,
        emp,
        AbsenceType::Holiday,
        date(2026, 8, 3),
        date(2026, 8, 7),
        at(2026, 2, 1),
    )
    .await
    .unwrap();

    assert_eq!(repo::employees::delete_employee(&pool, emp).await.unwrap(), 1);

    assert!(repo::absences::get_absences(&pool, Some(emp))
        .await
        .unwrap()
        .is_empty());
    assert!(repo::requests::get_requests(&pool, None, Some(emp))
        .await
        .unwrap()
        .is_empty());
}
