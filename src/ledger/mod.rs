//! The household ledger: its rows, the CSV file they live in, the totals
//! computed from them, and the page and endpoints for working with them.

mod aggregation;
mod cards;
mod charts;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod page;
mod record;
mod store;
mod tables;

pub use aggregation::{
    CategoryTotal, MonthlyBalance, Summary, category_totals, income_expense_balance, monthly_trend,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use page::get_ledger_page;
pub use record::{Amount, Field, LedgerDate, TransactionRecord, TransactionType};
pub use store::LedgerStore;
