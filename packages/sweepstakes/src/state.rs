use cosmwasm_std::{Addr, Binary, Decimal, MessageInfo, StdError, StdResult, Timestamp, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const NONCE_LENGTH: usize = 32; // Short nonces could be brute-forced from their hash
pub const NONCE_HASH_LENGTH: usize = 32; // SHA-256 commitment of the nonce
pub const MAX_WINNERS: u32 = 255; // The rank is hashed as a single byte
pub const LATEST_TICKETS_FOR_SEED: usize = 10; // Last tickets sold feeding the seed
pub const MAX_TICKETS: u64 = 5_000; // The whole ledger is drawn in one execution

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum SweepstakesState {
    Open,
    Closed,
    Drawn,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct Ownership {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
}

impl Ownership {
    pub fn new(owner: Addr) -> Self {
        Ownership {
            owner,
            pending_owner: None,
        }
    }

    pub fn propose(mut self, pending_owner: Addr) -> Self {
        self.pending_owner = Some(pending_owner);
        self
    }

    /// Only the proposed address can accept the ownership
    pub fn accept(mut self, info: &MessageInfo) -> StdResult<Self> {
        match self.pending_owner.take() {
            Some(pending) if pending == info.sender => {
                self.owner = pending;
                Ok(self)
            }
            _ => Err(StdError::generic_err("Unauthorized")),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct ContractInfo {
    pub name: String,
    pub owner: Ownership,
    pub ticket_issuer: Addr, // The purchase flow allowed to record tickets
    pub last_sweepstakes_id: Option<u64>,
    pub lock: bool, // Wether the contract can accept new sweepstakes
}

/// One line of the prize table, covering ranks `min_rank..=max_rank`
#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct PrizeTier {
    pub min_rank: u32,
    pub max_rank: u32,
    pub label: String,
    pub amount: Uint128,
}

impl PrizeTier {
    pub fn covers(&self, rank: u32) -> bool {
        self.min_rank <= rank && rank <= self.max_rank
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug, Default)]
pub struct PrizeTable(pub Vec<PrizeTier>);

impl PrizeTable {
    pub fn new(tiers: Vec<PrizeTier>) -> Self {
        PrizeTable(tiers)
    }

    pub fn tiers(&self) -> &[PrizeTier] {
        &self.0
    }

    /// Number of winners the table pays out
    pub fn total_winner_count(&self) -> u32 {
        self.0.iter().map(|tier| tier.max_rank).max().unwrap_or(0)
    }

    pub fn prize_for_rank(&self, rank: u32) -> Option<&PrizeTier> {
        self.0.iter().find(|tier| tier.covers(rank))
    }

    /// Tiers must follow each other without gap or overlap, starting at rank 1
    pub fn validate(&self) -> StdResult<()> {
        if self.0.is_empty() {
            return Err(StdError::generic_err("The prize table is empty"));
        }
        let mut next_rank = 1u32;
        for tier in self.0.iter() {
            if tier.min_rank != next_rank {
                return Err(StdError::generic_err(format!(
                    "Prize tier '{}' should start at rank {}",
                    tier.label, next_rank
                )));
            }
            if tier.max_rank < tier.min_rank {
                return Err(StdError::generic_err(format!(
                    "Prize tier '{}' ends before it starts",
                    tier.label
                )));
            }
            if tier.label.trim().is_empty() {
                return Err(StdError::generic_err("Prize tiers need a label"));
            }
            next_rank = tier.max_rank.saturating_add(1);
        }
        if self.total_winner_count() > MAX_WINNERS {
            return Err(StdError::generic_err(format!(
                "A sweepstakes can't have more than {} winners",
                MAX_WINNERS
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct Ticket {
    pub id: String,
    pub owner: Addr,
    pub sweepstakes_id: u64,
    pub weight: Decimal,
    pub created_at: Timestamp,
}

impl Ticket {
    pub fn ticket_id(sweepstakes_id: u64, sequence: u64) -> String {
        format!("{}-{}", sweepstakes_id, sequence)
    }

    pub fn created_at_millis(&self) -> u64 {
        self.created_at.nanos() / 1_000_000
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct SweepstakesInfo {
    pub name: String,
    pub created_at: Timestamp,
    pub close_time: Timestamp,
    pub nonce_hash: Binary, // Published at creation
    pub nonce: Option<Binary>, // Revealed by the draw
    pub prize_table: PrizeTable,
    pub number_of_tickets: u64,
    pub max_tickets: u64,
    pub total_weight: Decimal,
    pub winning_ticket_ids: Vec<String>,
    pub drawn_at: Option<Timestamp>,
}

impl SweepstakesInfo {
    pub fn is_drawn(&self) -> bool {
        self.drawn_at.is_some() || !self.winning_ticket_ids.is_empty()
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, JsonSchema, Debug)]
#[serde(rename_all = "snake_case")]
pub struct Winner {
    pub rank: u32,
    pub label: String,
    pub prize_amount: Uint128,
    pub ticket_id: String,
    pub user: Addr,
}
