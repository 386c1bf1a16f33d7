pub mod columns;
pub mod filter;
pub mod history;
pub mod working_days;
