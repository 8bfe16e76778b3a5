pub mod attempt;
pub mod execute_batch;
pub mod history;
pub mod subscribers;
