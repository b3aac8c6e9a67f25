use cosmwasm_std::Empty;
use cw_multi_test::{App, Contract, ContractWrapper};

pub fn custom_mock_app() -> App {
    App::default()
}

pub fn contract_sweepstakes() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        sweepstakes::contract::execute,
        sweepstakes::contract::instantiate,
        sweepstakes::contract::query,
    )
    .with_migrate(sweepstakes::contract::migrate);
    Box::new(contract)
}
