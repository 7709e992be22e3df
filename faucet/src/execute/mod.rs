//! Execute handlers for the Mystery Box faucet.
//!
//! - `fund` - CW20 receive hook that tops up the faucet
//! - `claim` - Self claims and agent claims on behalf of a user
//! - `admin` - Owner-only parameter changes and emergency withdrawal

mod admin;
mod claim;
mod fund;

pub use admin::*;
pub use claim::*;
pub use fund::*;
