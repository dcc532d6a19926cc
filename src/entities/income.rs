//! Income entity - Represents a paycheck source.
//!
//! The primary income (or the first one when none is flagged) drives the
//! payday cycle; others are kept for reference only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    /// Unique identifier for the income
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Day job")
    pub name: String,
    /// Expected amount of each paycheck in dollars
    pub paycheck_amount: f64,
    /// One of `weekly`, `biweekly`, `semimonthly`, `monthly`, `irregular`
    pub pay_frequency: String,
    /// Date of the next paycheck, if scheduled
    pub next_payday: Option<Date>,
    /// Whether this income drives the payday cycle
    pub is_primary: bool,
}

/// `Income` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
