//! One-time deposit entity - A windfall expected outside the pay schedule.
//!
//! Tax refunds, bonuses and similar. Deposits are listed alongside the payday
//! plan until marked received; they never feed the bills bucket.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One-time deposit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "one_time_deposits")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the money is (e.g., "Tax refund")
    pub name: String,
    /// Expected amount in dollars
    pub amount: f64,
    /// When the money should arrive
    pub expected_date: Date,
    /// Whether the deposit has landed
    pub received: bool,
}

/// `OneTimeDeposit` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
