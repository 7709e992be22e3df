//! Claim Rules
//!
//! Pure checks applied by every claim path. Amount bounds are expressed in basis
//! points of the faucet balance at execution time:
//!
//! | Bound   | Default         | Comparison                              |
//! |---------|-----------------|-----------------------------------------|
//! | Minimum | 0.1% (10 bps)   | `amount * 10000 >= balance * min_bps`   |
//! | Maximum | 20% (2000 bps)  | `amount * 10000 <= balance * max_bps`   |
//!
//! Both sides are widened to 256 bits before comparing, so a boundary amount is
//! accepted exactly when it equals the bound with no rounding in between.
//!
//! ## Check order
//!
//! 1. Minimum bound
//! 2. Maximum bound
//! 3. Non-zero amount (only reachable when the minimum is 0 bps)
//! 4. Cooldown
//! 5. Amount covered by balance

use cosmwasm_std::Uint128;

use crate::error::ContractError;
use crate::state::{FaucetAccount, BPS_DENOMINATOR};

/// Reject limits where `min > max` or `max` exceeds 100%.
pub fn validate_claim_limits(min_bps: u64, max_bps: u64) -> Result<(), ContractError> {
    if min_bps > max_bps || max_bps > BPS_DENOMINATOR {
        return Err(ContractError::InvalidClaimLimits { min_bps, max_bps });
    }
    Ok(())
}

/// Smallest amount satisfying the minimum bound (rounded up).
pub fn min_claim_amount(balance: Uint128, min_bps: u64) -> Uint128 {
    let floor = balance.multiply_ratio(min_bps, BPS_DENOMINATOR);
    if floor.full_mul(Uint128::from(BPS_DENOMINATOR)) < balance.full_mul(Uint128::from(min_bps)) {
        floor + Uint128::one()
    } else {
        floor
    }
}

/// Largest amount satisfying the maximum bound (rounded down).
pub fn max_claim_amount(balance: Uint128, max_bps: u64) -> Uint128 {
    balance.multiply_ratio(max_bps, BPS_DENOMINATOR)
}

/// Validate a requested amount against the live balance and claim limits.
pub fn check_claim_amount(
    amount: Uint128,
    balance: Uint128,
    min_bps: u64,
    max_bps: u64,
) -> Result<(), ContractError> {
    let scaled = amount.full_mul(Uint128::from(BPS_DENOMINATOR));

    if scaled < balance.full_mul(Uint128::from(min_bps)) {
        return Err(ContractError::AmountTooSmall {
            min_amount: min_claim_amount(balance, min_bps),
            requested: amount,
        });
    }

    if scaled > balance.full_mul(Uint128::from(max_bps)) {
        return Err(ContractError::AmountTooLarge {
            max_amount: max_claim_amount(balance, max_bps),
            requested: amount,
        });
    }

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "claim amount must be greater than zero".to_string(),
        });
    }

    Ok(())
}

/// Timestamp at which an account may claim again; 0 if it never claimed.
pub fn claimable_at(account: Option<&FaucetAccount>, cooldown_period: u64) -> u64 {
    account
        .map(|a| a.last_claim_timestamp.saturating_add(cooldown_period))
        .unwrap_or(0)
}

/// Seconds left before an account may claim again.
pub fn remaining_cooldown(account: Option<&FaucetAccount>, cooldown_period: u64, now: u64) -> u64 {
    claimable_at(account, cooldown_period).saturating_sub(now)
}

pub fn check_cooldown(
    account: Option<&FaucetAccount>,
    cooldown_period: u64,
    now: u64,
) -> Result<(), ContractError> {
    let remaining = remaining_cooldown(account, cooldown_period, now);
    if remaining > 0 {
        return Err(ContractError::CooldownNotElapsed {
            claimable_at: claimable_at(account, cooldown_period),
            remaining_seconds: remaining,
        });
    }
    Ok(())
}

/// `percentage`% of the balance, rounded down.
pub fn amount_for_percentage(balance: Uint128, percentage: u8) -> Result<Uint128, ContractError> {
    if percentage == 0 || percentage > 100 {
        return Err(ContractError::InvalidPercentage { percentage });
    }
    Ok(balance.multiply_ratio(percentage as u128, 100u128))
}
