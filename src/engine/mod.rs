//! The decision core: request lifecycle transitions, clash detection over the
//! pending queue, and per-employee balance derivation. Handlers stay thin;
//! anything that mutates the absence store or the request ledger goes through
//! here.

pub mod absence;
pub mod clash;
pub mod lifecycle;
pub mod summary;
