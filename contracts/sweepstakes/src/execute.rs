use cosmwasm_std::{
    to_json_binary, Binary, Decimal, DepsMut, Env, Event, MessageInfo, Response, StdError,
    StdResult, Timestamp,
};
use sha2::{Digest, Sha256};

use crate::draw::draw_winners;
use crate::error::ContractError;
use crate::ledger::load_ledger;
use crate::state::{
    get_sweepstakes_state, is_owner, is_ticket_issuer, load_sweepstakes, CONTRACT_INFO,
    SWEEPSTAKES_INFO, TICKETS, USER_WEIGHTS,
};
use sweepstakes_export::msg::{is_valid_name, SelectWinnersResponse};
use sweepstakes_export::state::{
    PrizeTable, SweepstakesInfo, SweepstakesState, Ticket, MAX_TICKETS, NONCE_HASH_LENGTH,
    NONCE_LENGTH,
};

/// Create a new sweepstakes.
/// Owner only, refused while the contract is locked.
///
/// `close_time` : block time after which no ticket can be recorded and winners can be selected
///
/// `nonce_hash` : SHA-256 of the secret nonce. The nonce itself is only revealed when selecting the winners,
/// so the operator commits to it before the first ticket is sold
///
/// `prize_table` : the prize of every rank, which also fixes the number of winners
///
/// `max_tickets` : maximum number of tickets that can be recorded. Default : `MAX_TICKETS`
#[allow(clippy::too_many_arguments)]
pub fn execute_create_sweepstakes(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    close_time: Timestamp,
    nonce_hash: Binary,
    prize_table: PrizeTable,
    max_tickets: Option<u64>,
) -> Result<Response, ContractError> {
    let contract_info = is_owner(deps.storage, info.sender)?;
    if contract_info.lock {
        return Err(ContractError::ContractIsLocked {});
    }

    if !is_valid_name(&name) {
        return Err(ContractError::Std(StdError::generic_err(
            "Name is not in the expected format (3-50 UTF-8 bytes)",
        )));
    }
    if close_time <= env.block.time {
        return Err(ContractError::InvalidCloseTime {});
    }
    if nonce_hash.len() != NONCE_HASH_LENGTH {
        return Err(ContractError::InvalidNonceHash {
            expected: NONCE_HASH_LENGTH,
        });
    }
    prize_table
        .validate()
        .map_err(|err| ContractError::InvalidPrizeTable(err.to_string()))?;
    let max_tickets = max_tickets.unwrap_or(MAX_TICKETS);
    if max_tickets == 0 || max_tickets > MAX_TICKETS {
        return Err(ContractError::InvalidMaxTickets { max: MAX_TICKETS });
    }

    // We start by creating a new sweepstakes_id (simply incremented from the last id)
    let sweepstakes_id: u64 = CONTRACT_INFO
        .update(deps.storage, |mut c| -> StdResult<_> {
            c.last_sweepstakes_id = c.last_sweepstakes_id.map_or(Some(0), |id| Some(id + 1));
            Ok(c)
        })?
        .last_sweepstakes_id
        .ok_or(ContractError::Unreachable {})?;

    let winner_count = prize_table.total_winner_count();
    SWEEPSTAKES_INFO.update(deps.storage, sweepstakes_id, |sweepstakes| match sweepstakes {
        // We never overwrite an existing sweepstakes
        Some(_) => Err(ContractError::ExistsInSweepstakesInfo {}),
        None => Ok(SweepstakesInfo {
            name,
            created_at: env.block.time,
            close_time,
            nonce_hash,
            nonce: None,
            prize_table,
            number_of_tickets: 0,
            max_tickets,
            total_weight: Decimal::zero(),
            winning_ticket_ids: vec![],
            drawn_at: None,
        }),
    })?;

    Ok(Response::new()
        .add_attribute("action", "create_sweepstakes")
        .add_attribute("sweepstakes_id", sweepstakes_id.to_string())
        .add_attribute("close_time", close_time.to_string())
        .add_attribute("winner_count", winner_count.to_string())
        .add_attribute("max_tickets", max_tickets.to_string()))
}

/// Record a ticket sold by the purchase flow.
/// Only the ticket issuer can call this, and only while the sweepstakes is open.
/// The ticket is timestamped with the current block time.
pub fn execute_record_ticket(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sweepstakes_id: u64,
    owner: String,
    weight: Decimal,
) -> Result<Response, ContractError> {
    is_ticket_issuer(deps.storage, info.sender)?;
    let owner = deps.api.addr_validate(&owner)?;

    let mut sweepstakes_info = load_sweepstakes(deps.storage, sweepstakes_id)?;
    let status = get_sweepstakes_state(&env, &sweepstakes_info);
    if status != SweepstakesState::Open {
        return Err(ContractError::SweepstakesClosed { status });
    }
    if sweepstakes_info.number_of_tickets >= sweepstakes_info.max_tickets {
        return Err(ContractError::TooMuchTickets {
            max: sweepstakes_info.max_tickets,
        });
    }

    let sequence = sweepstakes_info.number_of_tickets;
    let ticket = Ticket {
        id: Ticket::ticket_id(sweepstakes_id, sequence),
        owner: owner.clone(),
        sweepstakes_id,
        weight,
        created_at: env.block.time,
    };
    TICKETS.save(deps.storage, (sweepstakes_id, sequence), &ticket)?;

    sweepstakes_info.number_of_tickets += 1;
    sweepstakes_info.total_weight = sweepstakes_info.total_weight.checked_add(weight)?;
    SWEEPSTAKES_INFO.save(deps.storage, sweepstakes_id, &sweepstakes_info)?;

    let user_weight = USER_WEIGHTS
        .may_load(deps.storage, (&owner, sweepstakes_id))?
        .unwrap_or_default()
        .checked_add(weight)?;
    USER_WEIGHTS.save(deps.storage, (&owner, sweepstakes_id), &user_weight)?;

    Ok(Response::new()
        .add_attribute("action", "record_ticket")
        .add_attribute("sweepstakes_id", sweepstakes_id.to_string())
        .add_attribute("ticket_id", ticket.id)
        .add_attribute("owner", owner)
        .add_attribute("weight", weight.to_string()))
}

/// Select the winners of a closed sweepstakes, exactly once.
///
/// Everything happens inside this single execution : if anything fails, nothing is written.
/// Executions are sequential, so a second call for the same sweepstakes only starts once the first one
/// is committed and then stops on `AlreadySelected`.
///
/// The checks come first, in that order : caller, existence, close time, previous draw, tickets, nonce.
/// The nonce must match the commitment stored at creation. It is saved along with the winners
/// so that anybody can replay the draw (see the `VerifyDraw` query).
pub fn execute_select_winners(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sweepstakes_id: u64,
    nonce: Binary,
) -> Result<Response, ContractError> {
    is_owner(deps.storage, info.sender)?;

    let mut sweepstakes_info = load_sweepstakes(deps.storage, sweepstakes_id)?;
    if env.block.time < sweepstakes_info.close_time {
        return Err(ContractError::NotClosedYet {});
    }
    if sweepstakes_info.is_drawn() {
        return Err(ContractError::AlreadySelected {});
    }

    let ledger = load_ledger(deps.storage, sweepstakes_id)?;

    if nonce.len() != NONCE_LENGTH {
        return Err(ContractError::InvalidNonceLength {
            expected: NONCE_LENGTH,
        });
    }
    if Sha256::digest(nonce.as_slice()).as_slice() != sweepstakes_info.nonce_hash.as_slice() {
        return Err(ContractError::InvalidNonce {});
    }

    let draw = draw_winners(&ledger, &sweepstakes_info.prize_table, nonce.as_slice())?;

    sweepstakes_info.winning_ticket_ids = draw.winning_ticket_ids();
    sweepstakes_info.nonce = Some(nonce);
    sweepstakes_info.drawn_at = Some(env.block.time);
    SWEEPSTAKES_INFO.save(deps.storage, sweepstakes_id, &sweepstakes_info)?;

    let draw_event = draw.winners.iter().fold(
        Event::new("sweepstakes_draw")
            .add_attribute("sweepstakes_id", sweepstakes_id.to_string())
            .add_attribute("seed", Binary::from(draw.seed.to_vec()).to_base64())
            .add_attribute("winner_count", draw.winners.len().to_string()),
        |event, winner| {
            event.add_attribute(format!("rank_{}", winner.rank), winner.ticket_id.clone())
        },
    );

    Ok(Response::new()
        .add_event(draw_event)
        .set_data(to_json_binary(&SelectWinnersResponse {
            winners: draw.winners,
        })?)
        .add_attribute("action", "select_winners")
        .add_attribute("sweepstakes_id", sweepstakes_id.to_string()))
}
