//! Payday history entity - Snapshot of one completed payday.
//!
//! Written once by cycle completion and only read back for display.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payday history database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payday_history")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The payday this record completes; at most one row per date
    #[sea_orm(unique)]
    pub payday_date: Date,
    /// Paycheck amount used for the allocation
    pub paycheck_amount: f64,
    /// Bills bucket including the carried-forward balance
    pub bills_amount: f64,
    /// Spending bucket
    pub spending_amount: f64,
    /// Savings bucket
    pub savings_amount: f64,
    /// Bills bucket left over after paying bills
    pub bills_unallocated: f64,
    /// When completion was recorded
    pub completed_at: DateTimeUtc,
}

/// Defines relationships between `PaydayHistory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One payday has many paid bill lines
    #[sea_orm(has_many = "super::payday_history_bill::Entity")]
    Bills,
}

impl Related<super::payday_history_bill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
