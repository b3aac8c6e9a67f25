#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response};

use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{execute_create_sweepstakes, execute_record_ticket, execute_select_winners};
use crate::query::{
    query_all_sweepstakes, query_contract_info, query_sweepstakes, query_ticket_weight,
    query_tickets, query_verify_draw, query_winners,
};
use crate::state::{is_owner, CONTRACT_INFO};
use sweepstakes_export::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use sweepstakes_export::state::{ContractInfo, Ownership};

const CONTRACT_NAME: &str = "illiquidlabs.io:sweepstakes";
const CONTRACT_VERSION: &str = "0.1.0";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Verify the contract name
    msg.validate()?;
    // store token info
    let owner = deps
        .api
        .addr_validate(&msg.owner.unwrap_or_else(|| info.sender.to_string()))?;
    let data = ContractInfo {
        name: msg.name,
        owner: Ownership::new(owner.clone()),
        ticket_issuer: deps
            .api
            .addr_validate(&msg.ticket_issuer.unwrap_or_else(|| owner.to_string()))?,
        last_sweepstakes_id: None,
        lock: false,
    };
    CONTRACT_INFO.save(deps.storage, &data)?;
    Ok(Response::default()
        .add_attribute("action", "init")
        .add_attribute("contract", "sweepstakes")
        .add_attribute("owner", data.owner.owner)
        .add_attribute("ticket_issuer", data.ticket_issuer))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateSweepstakes {
            name,
            close_time,
            nonce_hash,
            prize_table,
            max_tickets,
        } => execute_create_sweepstakes(
            deps,
            env,
            info,
            name,
            close_time,
            nonce_hash,
            prize_table,
            max_tickets,
        ),
        ExecuteMsg::RecordTicket {
            sweepstakes_id,
            owner,
            weight,
        } => execute_record_ticket(deps, env, info, sweepstakes_id, owner, weight),
        ExecuteMsg::SelectWinners {
            sweepstakes_id,
            nonce,
        } => execute_select_winners(deps, env, info, sweepstakes_id, nonce),

        // Admin messages
        ExecuteMsg::ToggleLock { lock } => execute_toggle_lock(deps, env, info, lock),
        ExecuteMsg::ChangeParameter { parameter, value } => {
            execute_change_parameter(deps, env, info, parameter, value)
        }
        ExecuteMsg::ClaimOwnership {} => execute_claim_ownership(deps, env, info),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(_deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    // No state migrations performed, just returned a Response
    Ok(Response::default())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    Ok(match msg {
        QueryMsg::ContractInfo {} => to_json_binary(&query_contract_info(deps)?)?,
        QueryMsg::SweepstakesInfo { sweepstakes_id } => {
            to_json_binary(&query_sweepstakes(deps, env, sweepstakes_id)?)?
        }
        QueryMsg::AllSweepstakes {
            start_after,
            limit,
            filters,
        } => to_json_binary(&query_all_sweepstakes(
            deps,
            env,
            start_after,
            limit,
            filters,
        )?)?,
        QueryMsg::Tickets {
            sweepstakes_id,
            start_after,
            limit,
        } => to_json_binary(&query_tickets(deps, sweepstakes_id, start_after, limit)?)?,
        QueryMsg::TicketWeight {
            owner,
            sweepstakes_id,
        } => to_json_binary(&query_ticket_weight(deps, sweepstakes_id, owner)?)?,
        QueryMsg::Winners { sweepstakes_id } => {
            to_json_binary(&query_winners(deps, sweepstakes_id)?)?
        }
        QueryMsg::VerifyDraw { sweepstakes_id } => {
            to_json_binary(&query_verify_draw(deps, sweepstakes_id)?)?
        }
    })
}

/// Locking the contract (lock=true) means preventing the creation of new sweepstakes
/// Tickets can still be recorded and winners selected when the contract is locked
pub fn execute_toggle_lock(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    lock: bool,
) -> Result<Response, ContractError> {
    let mut contract_info = is_owner(deps.storage, info.sender)?;

    contract_info.lock = lock;
    CONTRACT_INFO.save(deps.storage, &contract_info)?;

    Ok(Response::new()
        .add_attribute("action", "modify_parameter")
        .add_attribute("parameter", "contract_lock")
        .add_attribute("value", lock.to_string()))
}

/// Change the different contract parameters
/// Admin only action
/// `owner` only proposes a new owner, who then has to claim the ownership
pub fn execute_change_parameter(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    parameter: String,
    value: String,
) -> Result<Response, ContractError> {
    let mut contract_info = is_owner(deps.storage, info.sender)?;

    match parameter.as_str() {
        "owner" => {
            let owner = deps.api.addr_validate(&value)?;
            contract_info.owner = contract_info.owner.propose(owner);
        }
        "ticket_issuer" => {
            let addr = deps.api.addr_validate(&value)?;
            contract_info.ticket_issuer = addr;
        }
        _ => return Err(ContractError::ParameterNotFound {}),
    }

    CONTRACT_INFO.save(deps.storage, &contract_info)?;

    Ok(Response::new()
        .add_attribute("action", "modify_parameter")
        .add_attribute("parameter", parameter)
        .add_attribute("value", value))
}

pub fn execute_claim_ownership(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut contract_info = CONTRACT_INFO.load(deps.storage)?;
    contract_info.owner = contract_info
        .owner
        .accept(&info)
        .map_err(|_| ContractError::Unauthorized {})?;
    CONTRACT_INFO.save(deps.storage, &contract_info)?;

    Ok(Response::new()
        .add_attribute("action", "claim_ownership")
        .add_attribute("owner", info.sender))
}
