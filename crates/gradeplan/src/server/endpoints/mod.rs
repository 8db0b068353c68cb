pub mod calculator;
pub mod export;
pub mod records;
pub mod status;
