pub mod account;
pub mod error;
pub mod config;
pub mod cli;
