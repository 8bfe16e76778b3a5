pub mod execution_record;
pub mod stock;
pub mod subscriber;
