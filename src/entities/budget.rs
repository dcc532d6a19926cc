//! Budget entity - Bucket percentages and the bills carry-forward balance.
//!
//! A store holds a single budget row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Percentage of each paycheck sent to the bills bucket
    pub bills_percentage: f64,
    /// Percentage of each paycheck sent to the spending bucket
    pub spending_percentage: f64,
    /// Percentage of each paycheck sent to the savings bucket
    pub savings_percentage: f64,
    /// Bills bucket remainder carried over from the last completed payday
    pub bills_bucket_balance: f64,
    /// When the budget was last modified
    pub updated_at: DateTime,
}

/// `Budget` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
