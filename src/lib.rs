pub mod config;
pub mod control;
pub mod driver;
pub mod error;
pub mod process;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
