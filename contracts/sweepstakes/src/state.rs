use cosmwasm_std::{Addr, Decimal, Env, Storage};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;
use sweepstakes_export::state::{ContractInfo, SweepstakesInfo, SweepstakesState, Ticket};

pub const CONTRACT_INFO: Item<ContractInfo> = Item::new("contract_info");
pub const SWEEPSTAKES_INFO: Map<u64, SweepstakesInfo> = Map::new("sweepstakes_info");
// Keyed by (sweepstakes_id, sequence), the sequence follows the creation order
pub const TICKETS: Map<(u64, u64), Ticket> = Map::new("tickets");
pub const USER_WEIGHTS: Map<(&Addr, u64), Decimal> = Map::new("user_weights");

pub fn is_owner(storage: &dyn Storage, sender: Addr) -> Result<ContractInfo, ContractError> {
    let contract_info = CONTRACT_INFO.load(storage)?;
    if sender == contract_info.owner.owner {
        Ok(contract_info)
    } else {
        Err(ContractError::Unauthorized {})
    }
}

pub fn is_ticket_issuer(storage: &dyn Storage, sender: Addr) -> Result<ContractInfo, ContractError> {
    let contract_info = CONTRACT_INFO.load(storage)?;
    if sender == contract_info.ticket_issuer {
        Ok(contract_info)
    } else {
        Err(ContractError::Unauthorized {})
    }
}

pub fn load_sweepstakes(
    storage: &dyn Storage,
    sweepstakes_id: u64,
) -> Result<SweepstakesInfo, ContractError> {
    SWEEPSTAKES_INFO
        .may_load(storage, sweepstakes_id)?
        .ok_or(ContractError::NotFound { sweepstakes_id })
}

/// The state only depends on the block time and on the draw having happened.
/// Off-chain callers should keep in mind the close time is compared to the block time.
pub fn get_sweepstakes_state(env: &Env, sweepstakes_info: &SweepstakesInfo) -> SweepstakesState {
    if sweepstakes_info.is_drawn() {
        SweepstakesState::Drawn
    } else if env.block.time < sweepstakes_info.close_time {
        SweepstakesState::Open
    } else {
        SweepstakesState::Closed
    }
}
