use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only owner or claim agent can claim for a user")]
    UnauthorizedAgent,

    // ========================================================================
    // Claim Errors
    // ========================================================================

    #[error("Amount too small: minimum claim is {min_amount}, requested {requested}")]
    AmountTooSmall {
        min_amount: Uint128,
        requested: Uint128,
    },

    #[error("Amount too large: maximum claim is {max_amount}, requested {requested}")]
    AmountTooLarge {
        max_amount: Uint128,
        requested: Uint128,
    },

    #[error("Cooldown period not elapsed: {remaining_seconds} seconds remaining, claimable at {claimable_at}")]
    CooldownNotElapsed {
        claimable_at: u64,
        remaining_seconds: u64,
    },

    #[error("Insufficient funds: faucet holds {available}, requested {requested}")]
    InsufficientFunds {
        available: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid percentage: {percentage} (must be between 1 and 100)")]
    InvalidPercentage { percentage: u8 },

    #[error("Invalid claim limits: min {min_bps} bps, max {max_bps} bps (require min <= max <= 10000)")]
    InvalidClaimLimits { min_bps: u64, max_bps: u64 },

    #[error("Invalid token: faucet accepts {expected}, got {got}")]
    InvalidToken { expected: String, got: String },
}
