pub mod common;
pub mod config;
pub mod quote;
pub mod simulate;
