use cosmwasm_std::{Order, StdResult, Storage};

use crate::error::ContractError;
use crate::state::{SWEEPSTAKES_INFO, TICKETS};
use sweepstakes_export::state::{Ticket, LATEST_TICKETS_FOR_SEED};

/// Every ticket of a sweepstakes, as seen by a single contract execution
#[derive(Clone, Debug, PartialEq)]
pub struct Ledger {
    /// All tickets, oldest first
    pub tickets: Vec<Ticket>,
    /// The last tickets sold, newest first
    pub latest: Vec<Ticket>,
}

/// Loads the tickets the draw works on.
/// Reads only, the caller decides what to do with the result.
pub fn load_ledger(storage: &dyn Storage, sweepstakes_id: u64) -> Result<Ledger, ContractError> {
    if !SWEEPSTAKES_INFO.has(storage, sweepstakes_id) {
        return Err(ContractError::NotFound { sweepstakes_id });
    }

    let tickets = TICKETS
        .prefix(sweepstakes_id)
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, ticket)| ticket))
        .collect::<StdResult<Vec<Ticket>>>()?;

    if tickets.is_empty() {
        return Err(ContractError::NoEntries {});
    }

    let latest = TICKETS
        .prefix(sweepstakes_id)
        .range(storage, None, None, Order::Descending)
        .take(LATEST_TICKETS_FOR_SEED)
        .map(|item| item.map(|(_, ticket)| ticket))
        .collect::<StdResult<Vec<Ticket>>>()?;

    Ok(Ledger { tickets, latest })
}
