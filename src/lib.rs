pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

#[cfg(test)]
mod test;

pub use error::{ErrorKind, PortfolioError, PortfolioResult};
