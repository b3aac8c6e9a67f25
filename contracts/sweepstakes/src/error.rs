use cosmwasm_std::{OverflowError, StdError};
use sweepstakes_export::state::SweepstakesState;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Unreachable code, something weird happened")]
    Unreachable {},

    #[error("This action is not allowed, the contract is locked")]
    ContractIsLocked {},

    #[error("Key already exists in SweepstakesInfo")]
    ExistsInSweepstakesInfo {},

    #[error("Sweepstakes {sweepstakes_id:?} does not exist")]
    NotFound { sweepstakes_id: u64 },

    #[error("The sweepstakes is not closed yet, winners can only be selected after the close time")]
    NotClosedYet {},

    #[error("Winners were already selected for this sweepstakes")]
    AlreadySelected {},

    #[error("No ticket was sold for this sweepstakes")]
    NoEntries {},

    #[error("The winners of this sweepstakes have not been drawn yet")]
    NotDrawnYet {},

    #[error("Tickets can't be recorded anymore. Current status : {status:?}")]
    SweepstakesClosed { status: SweepstakesState },

    #[error("The revealed nonce doesn't match the committed nonce hash")]
    InvalidNonce {},

    #[error("The nonce should be {expected:?} bytes long")]
    InvalidNonceLength { expected: usize },

    #[error("The nonce hash should be a {expected:?} bytes SHA-256 digest")]
    InvalidNonceHash { expected: usize },

    #[error("Invalid prize table : {0}")]
    InvalidPrizeTable(String),

    #[error("The ticket limit should be between 1 and {max:?}")]
    InvalidMaxTickets { max: u64 },

    #[error("Too many tickets recorded, max : {max:?}")]
    TooMuchTickets { max: u64 },

    #[error("The close time should be in the future")]
    InvalidCloseTime {},

    #[error("No prize is configured for rank {rank:?}")]
    PrizeNotFound { rank: u32 },

    #[error("This parameter name was not found, you can't change it !")]
    ParameterNotFound {},
}
