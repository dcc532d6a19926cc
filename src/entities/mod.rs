//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod bill;
pub mod budget;
pub mod income;
pub mod one_time_deposit;
pub mod payday_history;
pub mod payday_history_bill;

// Re-export specific types to avoid conflicts
pub use bill::{Column as BillColumn, Entity as Bill, Model as BillModel};
pub use budget::{Column as BudgetColumn, Entity as Budget, Model as BudgetModel};
pub use income::{Column as IncomeColumn, Entity as Income, Model as IncomeModel};
pub use one_time_deposit::{
    Column as OneTimeDepositColumn, Entity as OneTimeDeposit, Model as OneTimeDepositModel,
};
pub use payday_history::{
    Column as PaydayHistoryColumn, Entity as PaydayHistory, Model as PaydayHistoryModel,
};
pub use payday_history_bill::{
    Column as PaydayHistoryBillColumn, Entity as PaydayHistoryBill,
    Model as PaydayHistoryBillModel,
};
