pub mod client;
pub mod data;
pub mod error;
pub mod tag;
