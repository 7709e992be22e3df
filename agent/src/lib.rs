//! Mystery Box Agent
//!
//! Off-chain tools for the Mystery Box faucet: claim on a user's behalf with a
//! random share of the balance, fund and drain the faucet, and read balances,
//! cooldowns and claim history. Transactions are signed locally and submitted
//! through a Terra Classic LCD endpoint.

pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod ledger;
pub mod service;

pub use client::LcdFaucetClient;
pub use config::Config;
pub use error::ToolError;
pub use ledger::{FaucetLedger, TxResult};
pub use service::{ClaimOutcome, FaucetToolService};
