use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Decimal, StdError, StdResult, Timestamp};

use crate::state::{ContractInfo, PrizeTable, SweepstakesInfo, SweepstakesState, Ticket, Winner};

pub fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < 3 || bytes.len() > 50 {
        return false;
    }
    true
}

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub owner: Option<String>,
    pub ticket_issuer: Option<String>,
}

#[cw_serde]
pub struct MigrateMsg {}

impl InstantiateMsg {
    pub fn validate(&self) -> StdResult<()> {
        // Check name
        if !is_valid_name(&self.name) {
            return Err(StdError::generic_err(
                "Name is not in the expected format (3-50 UTF-8 bytes)",
            ));
        }
        Ok(())
    }
}

#[cw_serde]
pub enum ExecuteMsg {
    CreateSweepstakes {
        name: String,
        close_time: Timestamp,
        nonce_hash: Binary,
        prize_table: PrizeTable,
        max_tickets: Option<u64>,
    },
    RecordTicket {
        sweepstakes_id: u64,
        owner: String,
        weight: Decimal,
    },
    SelectWinners {
        sweepstakes_id: u64,
        nonce: Binary,
    },

    // Admin messages
    ToggleLock {
        lock: bool,
    },
    ChangeParameter {
        parameter: String,
        value: String,
    },
    ClaimOwnership {},
}

#[cw_serde]
pub struct QueryFilters {
    pub states: Option<Vec<String>>,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ContractInfo)]
    ContractInfo {},
    #[returns(SweepstakesResponse)]
    SweepstakesInfo { sweepstakes_id: u64 },
    #[returns(AllSweepstakesResponse)]
    AllSweepstakes {
        start_after: Option<u64>,
        limit: Option<u32>,
        filters: Option<QueryFilters>,
    },
    #[returns(Vec<Ticket>)]
    Tickets {
        sweepstakes_id: u64,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Decimal)]
    TicketWeight { owner: String, sweepstakes_id: u64 },
    #[returns(WinnersResponse)]
    Winners { sweepstakes_id: u64 },
    #[returns(VerifyDrawResponse)]
    VerifyDraw { sweepstakes_id: u64 },
}

#[cw_serde]
pub struct SweepstakesResponse {
    pub sweepstakes_id: u64,
    pub sweepstakes_state: SweepstakesState,
    pub sweepstakes_info: SweepstakesInfo,
}

#[cw_serde]
pub struct AllSweepstakesResponse {
    pub sweepstakes: Vec<SweepstakesResponse>,
}

/// Data attached to a successful `SelectWinners` execution
#[cw_serde]
pub struct SelectWinnersResponse {
    pub winners: Vec<Winner>,
}

#[cw_serde]
pub struct WinnersResponse {
    pub sweepstakes_id: u64,
    pub winners: Vec<Winner>,
}

/// Replay of a finished draw from the public record
#[cw_serde]
pub struct VerifyDrawResponse {
    pub sweepstakes_id: u64,
    pub seed: Binary,
    pub winners: Vec<Winner>,
    pub matches_record: bool,
}
