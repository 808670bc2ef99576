pub mod error;
pub mod page;
pub mod query;
pub mod validation;
