//! Thin persistence layer over sqlx. Every function is generic over the
//! executor so lifecycle transitions can run the same queries inside an open
//! transaction.

pub mod absences;
pub mod employees;
pub mod requests;
pub mod stores;
