pub mod cli;
pub mod commands;
pub mod lookup;
pub mod report;
pub mod store;
pub mod utils;
