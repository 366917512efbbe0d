pub mod error;
pub mod registry;
