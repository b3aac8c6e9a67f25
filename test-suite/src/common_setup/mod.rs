pub mod contract_boxes;
pub mod setup;
