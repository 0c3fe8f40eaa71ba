pub mod query;
pub mod shell;
pub mod validate;
