//! Query handlers for the Mystery Box faucet.

use cosmwasm_std::{Deps, Env, Order, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::ledger::{claimable_at, max_claim_amount, min_claim_amount, remaining_cooldown};
use crate::msg::{
    AccountStatsResponse, BalanceResponse, ClaimBoundsResponse, ClaimLimitsResponse,
    ClaimResponse, ClaimsResponse, ConfigResponse, CooldownPeriodResponse, LastClaimResponse,
    StatsResponse, TimeUntilNextClaimResponse,
};
use crate::state::{ACCOUNTS, BALANCE, CLAIMS, CONFIG, STATS};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

// ============================================================================
// Configuration
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        token: config.token,
        claim_agent: config.claim_agent,
        cooldown_period: config.cooldown_period,
        min_claim_bps: config.min_claim_bps,
        max_claim_bps: config.max_claim_bps,
    })
}

pub fn query_cooldown_period(deps: Deps) -> StdResult<CooldownPeriodResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(CooldownPeriodResponse {
        seconds: config.cooldown_period,
    })
}

pub fn query_claim_limits(deps: Deps) -> StdResult<ClaimLimitsResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ClaimLimitsResponse {
        min_bps: config.min_claim_bps,
        max_bps: config.max_claim_bps,
    })
}

// ============================================================================
// Balance
// ============================================================================

pub fn query_faucet_balance(deps: Deps) -> StdResult<BalanceResponse> {
    Ok(BalanceResponse {
        balance: BALANCE.load(deps.storage)?,
    })
}

/// Claim window at the current balance. Off-chain callers use this to pick an
/// amount the contract will accept.
pub fn query_claim_bounds(deps: Deps) -> StdResult<ClaimBoundsResponse> {
    let config = CONFIG.load(deps.storage)?;
    let balance = BALANCE.load(deps.storage)?;
    Ok(ClaimBoundsResponse {
        balance,
        min_amount: min_claim_amount(balance, config.min_claim_bps),
        max_amount: max_claim_amount(balance, config.max_claim_bps),
    })
}

// ============================================================================
// Accounts
// ============================================================================

pub fn query_last_claim(deps: Deps, user: String) -> StdResult<LastClaimResponse> {
    let user = deps.api.addr_validate(&user)?;
    let last_claim = ACCOUNTS
        .may_load(deps.storage, &user)?
        .map(|a| a.last_claim_timestamp)
        .unwrap_or(0);
    Ok(LastClaimResponse { last_claim })
}

pub fn query_time_until_next_claim(
    deps: Deps,
    env: Env,
    user: String,
) -> StdResult<TimeUntilNextClaimResponse> {
    let user = deps.api.addr_validate(&user)?;
    let config = CONFIG.load(deps.storage)?;
    let account = ACCOUNTS.may_load(deps.storage, &user)?;

    Ok(TimeUntilNextClaimResponse {
        remaining_seconds: remaining_cooldown(
            account.as_ref(),
            config.cooldown_period,
            env.block.time.seconds(),
        ),
        claimable_at: claimable_at(account.as_ref(), config.cooldown_period),
    })
}

pub fn query_account_stats(deps: Deps, user: String) -> StdResult<AccountStatsResponse> {
    let user = deps.api.addr_validate(&user)?;
    let account = ACCOUNTS.may_load(deps.storage, &user)?;

    Ok(match account {
        Some(a) => AccountStatsResponse {
            user,
            total_claimed: a.total_claimed,
            claim_count: a.claim_count,
            first_claim: a.first_claim_timestamp,
            last_claim: a.last_claim_timestamp,
            average_claim: a.total_claimed.multiply_ratio(1u128, a.claim_count as u128),
        },
        None => AccountStatsResponse {
            user,
            total_claimed: Uint128::zero(),
            claim_count: 0,
            first_claim: 0,
            last_claim: 0,
            average_claim: Uint128::zero(),
        },
    })
}

// ============================================================================
// History
// ============================================================================

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_claims: stats.total_claims,
        total_claimed: stats.total_claimed,
        total_funded: stats.total_funded,
        total_withdrawn: stats.total_withdrawn,
    })
}

/// Claims newest first. Pass the last `id` of a page as `start_before` to fetch the next one.
pub fn query_recent_claims(
    deps: Deps,
    start_before: Option<u64>,
    limit: Option<u32>,
) -> StdResult<ClaimsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let end = start_before.map(Bound::exclusive);

    let claims = CLAIMS
        .range(deps.storage, None, end, Order::Descending)
        .take(limit)
        .map(|item| {
            let (_, record) = item?;
            Ok(ClaimResponse {
                id: record.id,
                claimer: record.claimer,
                amount: record.amount,
                balance_before: record.balance_before,
                timestamp: record.timestamp,
                via_agent: record.via_agent,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ClaimsResponse { claims })
}
