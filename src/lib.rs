pub mod error;
pub mod grid;
pub mod input;
pub mod layout;
pub mod report;
pub mod solver;
pub mod types;

pub use error::{Error, Result};
