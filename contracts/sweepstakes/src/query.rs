use std::collections::HashMap;

use cosmwasm_std::{Binary, Decimal, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;

use crate::draw::draw_winners;
use crate::error::ContractError;
use crate::ledger::load_ledger;
use crate::state::{
    get_sweepstakes_state, load_sweepstakes, CONTRACT_INFO, SWEEPSTAKES_INFO, TICKETS,
    USER_WEIGHTS,
};
use sweepstakes_export::msg::{
    AllSweepstakesResponse, QueryFilters, SweepstakesResponse, VerifyDrawResponse,
    WinnersResponse,
};
use sweepstakes_export::state::{ContractInfo, SweepstakesInfo, Ticket, Winner};

// settings for pagination
const MAX_LIMIT: u32 = 100;
const DEFAULT_LIMIT: u32 = 10;

pub fn query_contract_info(deps: Deps) -> StdResult<ContractInfo> {
    CONTRACT_INFO.load(deps.storage)
}

fn parse_sweepstakes(env: &Env, sweepstakes_id: u64, info: SweepstakesInfo) -> SweepstakesResponse {
    SweepstakesResponse {
        sweepstakes_id,
        sweepstakes_state: get_sweepstakes_state(env, &info),
        sweepstakes_info: info,
    }
}

pub fn query_sweepstakes(
    deps: Deps,
    env: Env,
    sweepstakes_id: u64,
) -> Result<SweepstakesResponse, ContractError> {
    let info = load_sweepstakes(deps.storage, sweepstakes_id)?;
    Ok(parse_sweepstakes(&env, sweepstakes_id, info))
}

/// Only keeps the sweepstakes in one of the filtered states
fn sweepstakes_filter(response: &SweepstakesResponse, filters: &Option<QueryFilters>) -> bool {
    match filters.as_ref().and_then(|filters| filters.states.as_ref()) {
        Some(states) => states.contains(&response.sweepstakes_state.to_string()),
        None => true,
    }
}

/// Query all sweepstakes, newest first
pub fn query_all_sweepstakes(
    deps: Deps,
    env: Env,
    start_after: Option<u64>,
    limit: Option<u32>,
    filters: Option<QueryFilters>,
) -> StdResult<AllSweepstakesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let end = start_after.map(Bound::exclusive);

    let sweepstakes = SWEEPSTAKES_INFO
        .range(deps.storage, None, end, Order::Descending)
        .map(|item| item.map(|(id, info)| parse_sweepstakes(&env, id, info)))
        .filter(|response| match response {
            Ok(response) => sweepstakes_filter(response, &filters),
            Err(_) => true,
        })
        .take(limit)
        .collect::<StdResult<Vec<SweepstakesResponse>>>()?;

    Ok(AllSweepstakesResponse { sweepstakes })
}

/// Query the tickets of a sweepstakes in the order they were sold
/// `start_after` is the sequence number of the last ticket already seen
pub fn query_tickets(
    deps: Deps,
    sweepstakes_id: u64,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<Ticket>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    TICKETS
        .prefix(sweepstakes_id)
        .range(deps.storage, start, None, Order::Ascending)
        .map(|item| item.map(|(_, ticket)| ticket))
        .take(limit)
        .collect()
}

/// Query the total weight a user holds in a sweepstakes
pub fn query_ticket_weight(
    deps: Deps,
    sweepstakes_id: u64,
    owner: String,
) -> StdResult<Decimal> {
    Ok(USER_WEIGHTS
        .may_load(
            deps.storage,
            (&deps.api.addr_validate(&owner)?, sweepstakes_id),
        )?
        .unwrap_or_default())
}

/// Rebuilds the winner records from the stored ticket ids and the prize table
pub fn query_winners(deps: Deps, sweepstakes_id: u64) -> Result<WinnersResponse, ContractError> {
    let info = load_sweepstakes(deps.storage, sweepstakes_id)?;
    if !info.is_drawn() {
        return Err(ContractError::NotDrawnYet {});
    }
    let ledger = load_ledger(deps.storage, sweepstakes_id)?;
    let tickets: HashMap<&str, &Ticket> = ledger
        .tickets
        .iter()
        .map(|ticket| (ticket.id.as_str(), ticket))
        .collect();

    let winners = info
        .winning_ticket_ids
        .iter()
        .enumerate()
        .map(|(index, ticket_id)| -> Result<Winner, ContractError> {
            let rank = index as u32 + 1;
            let ticket = tickets
                .get(ticket_id.as_str())
                .ok_or(ContractError::Unreachable {})?;
            let prize = info
                .prize_table
                .prize_for_rank(rank)
                .ok_or(ContractError::PrizeNotFound { rank })?;
            Ok(Winner {
                rank,
                label: prize.label.clone(),
                prize_amount: prize.amount,
                ticket_id: ticket.id.clone(),
                user: ticket.owner.clone(),
            })
        })
        .collect::<Result<Vec<Winner>, ContractError>>()?;

    Ok(WinnersResponse {
        sweepstakes_id,
        winners,
    })
}

/// Replays the draw from the public record : the revealed nonce and the stored tickets.
/// Anybody can run the same computation off-chain and compare.
pub fn query_verify_draw(
    deps: Deps,
    sweepstakes_id: u64,
) -> Result<VerifyDrawResponse, ContractError> {
    let info = load_sweepstakes(deps.storage, sweepstakes_id)?;
    let nonce = info.nonce.clone().ok_or(ContractError::NotDrawnYet {})?;

    let ledger = load_ledger(deps.storage, sweepstakes_id)?;
    let draw = draw_winners(&ledger, &info.prize_table, nonce.as_slice())?;

    Ok(VerifyDrawResponse {
        sweepstakes_id,
        seed: Binary::from(draw.seed.to_vec()),
        matches_record: draw.winning_ticket_ids() == info.winning_ticket_ids,
        winners: draw.winners,
    })
}
