//! Mystery Box Faucet - Entry Points
//!
//! Handlers live in:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_claim, execute_claim_for, execute_emergency_withdraw, execute_receive,
    execute_set_claim_agent, execute_set_claim_limits, execute_set_cooldown_period,
    execute_transfer_ownership,
};
use crate::ledger::validate_claim_limits;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_account_stats, query_claim_bounds, query_claim_limits, query_config,
    query_cooldown_period, query_faucet_balance, query_last_claim, query_recent_claims,
    query_stats, query_time_until_next_claim,
};
use crate::state::{
    Config, FaucetStats, BALANCE, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    DEFAULT_COOLDOWN_SECONDS, DEFAULT_MAX_CLAIM_BPS, DEFAULT_MIN_CLAIM_BPS, NEXT_CLAIM_ID, STATS,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let token = deps.api.addr_validate(&msg.token)?;
    let claim_agent = msg
        .claim_agent
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;

    let min_claim_bps = msg.min_claim_bps.unwrap_or(DEFAULT_MIN_CLAIM_BPS);
    let max_claim_bps = msg.max_claim_bps.unwrap_or(DEFAULT_MAX_CLAIM_BPS);
    validate_claim_limits(min_claim_bps, max_claim_bps)?;

    let config = Config {
        owner,
        token,
        claim_agent,
        cooldown_period: msg.cooldown_period.unwrap_or(DEFAULT_COOLDOWN_SECONDS),
        min_claim_bps,
        max_claim_bps,
    };
    CONFIG.save(deps.storage, &config)?;

    BALANCE.save(deps.storage, &Uint128::zero())?;
    STATS.save(deps.storage, &FaucetStats::default())?;
    NEXT_CLAIM_ID.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token", config.token)
        .add_attribute("cooldown_period", config.cooldown_period.to_string())
        .add_attribute("min_claim_bps", min_claim_bps.to_string())
        .add_attribute("max_claim_bps", max_claim_bps.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),
        ExecuteMsg::Claim { amount } => execute_claim(deps, env, info, amount),
        ExecuteMsg::ClaimFor {
            recipient,
            percentage,
        } => execute_claim_for(deps, env, info, recipient, percentage),
        ExecuteMsg::SetCooldownPeriod { seconds } => {
            execute_set_cooldown_period(deps, info, seconds)
        }
        ExecuteMsg::SetClaimLimits { min_bps, max_bps } => {
            execute_set_claim_limits(deps, info, min_bps, max_bps)
        }
        ExecuteMsg::SetClaimAgent { agent } => execute_set_claim_agent(deps, info, agent),
        ExecuteMsg::EmergencyWithdraw { amount } => {
            execute_emergency_withdraw(deps, info, amount)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::FaucetBalance {} => to_json_binary(&query_faucet_balance(deps)?),
        QueryMsg::CooldownPeriod {} => to_json_binary(&query_cooldown_period(deps)?),
        QueryMsg::ClaimLimits {} => to_json_binary(&query_claim_limits(deps)?),
        QueryMsg::ClaimBounds {} => to_json_binary(&query_claim_bounds(deps)?),
        QueryMsg::LastClaim { user } => to_json_binary(&query_last_claim(deps, user)?),
        QueryMsg::TimeUntilNextClaim { user } => {
            to_json_binary(&query_time_until_next_claim(deps, env, user)?)
        }
        QueryMsg::AccountStats { user } => to_json_binary(&query_account_stats(deps, user)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::RecentClaims {
            start_before,
            limit,
        } => to_json_binary(&query_recent_claims(deps, start_before, limit)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
