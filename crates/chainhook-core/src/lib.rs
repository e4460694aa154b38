pub mod cache;
pub mod config;
pub mod enforce;
pub mod error;
pub mod interpret;
pub mod io;
pub mod paths;
pub mod reminder;
pub mod state;
pub mod verdict;

pub use error::{HookError, Result};
