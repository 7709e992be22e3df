//! State definitions for the Mystery Box faucet
//!
//! The faucet keeps its own view of the custodied balance rather than querying
//! the CW20 contract, so claim bounds are always computed against what has been
//! funded and not yet paid out.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:mystery-box-faucet";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Defaults
// ============================================================================

/// Default cooldown between claims of one account (24 hours)
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 86_400;

/// Default minimum claim: 0.1% of the live balance
pub const DEFAULT_MIN_CLAIM_BPS: u64 = 10;

/// Default maximum claim: 20% of the live balance
pub const DEFAULT_MAX_CLAIM_BPS: u64 = 2_000;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

// ============================================================================
// Structures
// ============================================================================

/// Faucet configuration
#[cw_serde]
pub struct Config {
    /// Administrative address (parameter changes, emergency withdrawal)
    pub owner: Addr,
    /// CW20 token held by the faucet
    pub token: Addr,
    /// Address allowed to claim on behalf of users
    pub claim_agent: Option<Addr>,
    /// Seconds an account must wait between claims
    pub cooldown_period: u64,
    /// Lower claim bound in basis points of the current balance
    pub min_claim_bps: u64,
    /// Upper claim bound in basis points of the current balance
    pub max_claim_bps: u64,
}

/// Per-claimer ledger entry
#[cw_serde]
pub struct FaucetAccount {
    pub first_claim_timestamp: u64,
    pub last_claim_timestamp: u64,
    pub total_claimed: Uint128,
    pub claim_count: u64,
}

/// A single successful claim
#[cw_serde]
pub struct ClaimRecord {
    pub id: u64,
    pub claimer: Addr,
    pub amount: Uint128,
    /// Faucet balance the amount was validated against
    pub balance_before: Uint128,
    pub timestamp: u64,
    /// Whether the claim agent submitted it for the claimer
    pub via_agent: bool,
}

/// Faucet-wide counters
#[cw_serde]
#[derive(Default)]
pub struct FaucetStats {
    pub total_claims: u64,
    pub total_claimed: Uint128,
    pub total_funded: Uint128,
    pub total_withdrawn: Uint128,
}

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Tokens currently custodied for claims
pub const BALANCE: Item<Uint128> = Item::new("balance");

pub const STATS: Item<FaucetStats> = Item::new("stats");

/// claimer => account entry (absent = never claimed)
pub const ACCOUNTS: Map<&Addr, FaucetAccount> = Map::new("accounts");

/// claim id => record
pub const CLAIMS: Map<u64, ClaimRecord> = Map::new("claims");

/// Id assigned to the next claim
pub const NEXT_CLAIM_ID: Item<u64> = Item::new("next_claim_id");
