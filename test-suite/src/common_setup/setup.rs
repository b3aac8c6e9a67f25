use cosmwasm_std::{Addr, Binary, BlockInfo, Decimal, Timestamp, Uint128};
use cw_multi_test::{App, AppResponse, Executor};
use sha2::{Digest, Sha256};

use sweepstakes_export::msg::{ExecuteMsg, InstantiateMsg};
use sweepstakes_export::state::{PrizeTable, PrizeTier};

use super::contract_boxes::{contract_sweepstakes, custom_mock_app};

pub const OWNER_ADDR: &str = "owner";
pub const ISSUER_ADDR: &str = "issuer";
pub const NAME: &str = "weekly sweepstakes";
pub const GENESIS_TIME: u64 = 1647032400000000000;
pub const SALES_DURATION: u64 = 3600;

pub fn proper_instantiate() -> (App, Addr) {
    let mut app = custom_mock_app();
    let chain_id = app.block_info().chain_id;
    app.set_block(BlockInfo {
        height: 10000,
        time: Timestamp::from_nanos(GENESIS_TIME),
        chain_id,
    });
    let sweepstakes_id = app.store_code(contract_sweepstakes());

    let sweepstakes_addr = app
        .instantiate_contract(
            sweepstakes_id,
            Addr::unchecked(OWNER_ADDR),
            &InstantiateMsg {
                name: NAME.to_string(),
                owner: Some(OWNER_ADDR.to_string()),
                ticket_issuer: Some(ISSUER_ADDR.to_string()),
            },
            &[],
            "sweepstakes",
            None,
        )
        .unwrap();

    (app, sweepstakes_addr)
}

pub fn advance_time(app: &mut App, seconds: u64) {
    app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
        block.height += 1;
    });
}

pub fn nonce_hash(nonce: &[u8]) -> Binary {
    Binary::from(Sha256::digest(nonce).to_vec())
}

/// Grand prize, then two runner-ups
pub fn three_winner_table() -> PrizeTable {
    PrizeTable::new(vec![
        PrizeTier {
            min_rank: 1,
            max_rank: 1,
            label: "grand prize".to_string(),
            amount: Uint128::new(10_000),
        },
        PrizeTier {
            min_rank: 2,
            max_rank: 3,
            label: "runner-up".to_string(),
            amount: Uint128::new(500),
        },
    ])
}

pub fn create_sweepstakes(
    app: &mut App,
    sweepstakes_addr: &Addr,
    nonce: &[u8],
    prize_table: PrizeTable,
) -> anyhow::Result<AppResponse> {
    let close_time = app.block_info().time.plus_seconds(SALES_DURATION);
    app.execute_contract(
        Addr::unchecked(OWNER_ADDR),
        sweepstakes_addr.clone(),
        &ExecuteMsg::CreateSweepstakes {
            name: NAME.to_string(),
            close_time,
            nonce_hash: nonce_hash(nonce),
            prize_table,
            max_tickets: None,
        },
        &[],
    )
}

pub fn record_ticket(
    app: &mut App,
    sweepstakes_addr: &Addr,
    sweepstakes_id: u64,
    owner: &str,
    weight: Decimal,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(ISSUER_ADDR),
        sweepstakes_addr.clone(),
        &ExecuteMsg::RecordTicket {
            sweepstakes_id,
            owner: owner.to_string(),
            weight,
        },
        &[],
    )
}

pub fn select_winners(
    app: &mut App,
    sweepstakes_addr: &Addr,
    sweepstakes_id: u64,
    nonce: &[u8],
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(OWNER_ADDR),
        sweepstakes_addr.clone(),
        &ExecuteMsg::SelectWinners {
            sweepstakes_id,
            nonce: Binary::from(nonce),
        },
        &[],
    )
}
