pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod logging;
#[cfg(test)]
mod test_utils;
