pub mod common;
pub mod organization;
pub mod query;
