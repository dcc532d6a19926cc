//! Framework-agnostic payday planning logic.
//!
//! [`allocator`] is pure; the remaining modules read and write the store
//! through `SeaORM`.

pub mod allocator;
pub mod bill;
pub mod budget;
pub mod completion;
pub mod deposit;
pub mod history;
pub mod income;
pub mod planner;
pub mod report;
pub mod schedule;
pub mod validation;
