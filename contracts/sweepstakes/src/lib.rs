pub mod contract;
pub mod draw;
pub mod error;
mod execute;
pub mod ledger;
mod query;
pub mod rand;
pub mod ranges;
pub mod state;
