//! Payday history bill entity - One bill paid as part of a completed payday.
//!
//! Bill details are copied rather than referenced so history survives bill edits.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Paid bill line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payday_history_bills")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the payday this line belongs to
    pub payday_history_id: i64,
    /// Name of the bill at completion time
    pub bill_name: String,
    /// Amount the bill asked for
    pub amount_due: f64,
    /// Amount allocated to it
    pub amount_allocated: f64,
    /// Due date at completion time
    pub due_date: Date,
    /// Whether the bill was on autopay
    pub was_autopay: bool,
}

/// Defines relationships between `PaydayHistoryBill` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one payday
    #[sea_orm(
        belongs_to = "super::payday_history::Entity",
        from = "Column::PaydayHistoryId",
        to = "super::payday_history::Column::Id"
    )]
    PaydayHistory,
}

impl Related<super::payday_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaydayHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
