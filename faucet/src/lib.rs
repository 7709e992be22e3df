//! Mystery Box Faucet - Percentage-Bounded CW20 Faucet
//!
//! The faucet custodies a single CW20 token and pays each claimer a share of
//! its current balance, at most once per cooldown period.
//!
//! # Funding
//! Anyone funds the faucet with a CW20 `Send` carrying `ReceiveMsg::Fund {}`.
//!
//! # Claiming
//! 1. `Claim { amount }` - the sender picks an amount within the claim limits
//! 2. `ClaimFor { recipient, percentage }` - the claim agent (or owner) claims a
//!    percentage of the balance on a user's behalf
//!
//! Amounts are validated against the balance at execution time:
//! `min_claim_bps * balance <= amount * 10000 <= max_claim_bps * balance`.
//!
//! # Administration
//! The owner sets the cooldown, claim limits and claim agent, transfers
//! ownership, and may drain the faucet with `EmergencyWithdraw`.

pub mod contract;
pub mod error;
mod execute;
pub mod ledger;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
