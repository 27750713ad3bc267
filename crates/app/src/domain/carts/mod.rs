//! Carts

pub mod codec;
pub mod errors;
pub mod manager;
pub mod models;
pub mod repositories;

pub use errors::CartsManagerError;
pub use manager::*;
