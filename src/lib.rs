//! Placement matcher library

pub mod applications;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod output;

pub use config::Config;
pub use error::{PlacementError, Result};
