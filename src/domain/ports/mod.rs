pub mod broker_client;
pub mod execution_ledger;
pub mod market_data;
pub mod subscriber_directory;
