//! Bill entity - Represents a recurring or one-time bill.
//!
//! `allocated_amount` accumulates across completed paydays; `last_allocated_date`
//! records the payday that last paid the bill so completion can be retried safely.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bill database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    /// Unique identifier for the bill
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Electric")
    pub name: String,
    /// Amount due in dollars
    pub amount: f64,
    /// Date the bill is due
    pub due_date: Date,
    /// End of the grace period, None when the bill has none
    pub late_by_date: Option<Date>,
    /// Whether the biller charges automatically
    pub is_autopay: bool,
    /// Cumulative dollars allocated across paydays
    pub allocated_amount: f64,
    /// Payday on which the bill was last paid
    pub last_paid_date: Option<Date>,
    /// Payday on which an allocation was last recorded
    pub last_allocated_date: Option<Date>,
    /// Recurrence (`weekly`, `biweekly`, `monthly`, `quarterly`, `annually`), None for one-time
    pub frequency: Option<String>,
    /// Grouping for display (e.g., "utilities")
    pub category: String,
}

/// `Bill` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
