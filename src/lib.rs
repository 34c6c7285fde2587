//! cfgprobe: configuration schema discovery
//!
//! A library for discovering what can be configured in third-party
//! applications (terminal emulators, editors, shells) by racing several
//! imperfect sources and normalizing the winner into one [`schema::Config`].

pub mod cache;
pub mod config;
pub mod engine;
pub mod fetch;
pub mod parse;
pub mod runner;
pub mod schema;
pub mod strategy;
pub mod time;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_fixtures;
