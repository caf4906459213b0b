// src/lib.rs
pub mod config;
pub mod error;
pub mod scanner;

pub use config::CompileOptions;
pub use error::CompileError;
pub use scanner::{Pattern, Rule, State, StateTable, compile};
