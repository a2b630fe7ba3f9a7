//! Client-side query model: filter clauses, multi-column sort state, search request
//! assembly and pagination controls.

pub mod errors;
pub mod fields;
pub mod filter;
pub mod pagination;
pub mod request;
pub mod sort;
