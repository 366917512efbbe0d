pub mod encoder;
pub mod error;
pub mod schema;
pub mod vector;
