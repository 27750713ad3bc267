//! Shopping cart domain, persistence adapters and configuration.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
