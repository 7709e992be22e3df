//! Owner operations.
//!
//! This module handles:
//! - Cooldown and claim limit changes
//! - Claim agent assignment
//! - Ownership transfer
//! - Emergency withdrawal

use cosmwasm_std::{
    to_json_binary, CosmosMsg, DepsMut, MessageInfo, Response, StdError, Storage, Uint128,
    WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::ledger::validate_claim_limits;
use crate::state::{Config, BALANCE, CONFIG, STATS};

fn load_owned_config(storage: &dyn Storage, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

// ============================================================================
// Parameters
// ============================================================================

pub fn execute_set_cooldown_period(
    deps: DepsMut,
    info: MessageInfo,
    seconds: u64,
) -> Result<Response, ContractError> {
    let mut config = load_owned_config(deps.storage, &info)?;

    let old = config.cooldown_period;
    config.cooldown_period = seconds;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_cooldown_period")
        .add_attribute("old_seconds", old.to_string())
        .add_attribute("new_seconds", seconds.to_string()))
}

/// Replace both claim bounds at once; `min_bps <= max_bps <= 10000` is enforced.
pub fn execute_set_claim_limits(
    deps: DepsMut,
    info: MessageInfo,
    min_bps: u64,
    max_bps: u64,
) -> Result<Response, ContractError> {
    let mut config = load_owned_config(deps.storage, &info)?;
    validate_claim_limits(min_bps, max_bps)?;

    config.min_claim_bps = min_bps;
    config.max_claim_bps = max_bps;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_claim_limits")
        .add_attribute("min_bps", min_bps.to_string())
        .add_attribute("max_bps", max_bps.to_string()))
}

pub fn execute_set_claim_agent(
    deps: DepsMut,
    info: MessageInfo,
    agent: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = load_owned_config(deps.storage, &info)?;

    config.claim_agent = agent
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    let agent_attr = config
        .claim_agent
        .as_ref()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "none".to_string());

    Ok(Response::new()
        .add_attribute("action", "set_claim_agent")
        .add_attribute("claim_agent", agent_attr))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = load_owned_config(deps.storage, &info)?;

    let new_owner = deps.api.addr_validate(&new_owner)?;
    let previous = std::mem::replace(&mut config.owner, new_owner.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("previous_owner", previous)
        .add_attribute("new_owner", new_owner))
}

// ============================================================================
// Emergency Withdrawal
// ============================================================================

/// Drain `amount` to the owner. Claim limits and cooldown do not apply and the
/// withdrawal is not recorded as a claim.
pub fn execute_emergency_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = load_owned_config(deps.storage, &info)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "withdrawal amount must be greater than zero".to_string(),
        });
    }

    let balance = BALANCE.load(deps.storage)?;
    let new_balance = balance
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientFunds {
            available: balance,
            requested: amount,
        })?;
    BALANCE.save(deps.storage, &new_balance)?;

    STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
        stats.total_withdrawn = stats.total_withdrawn.checked_add(amount)?;
        Ok(stats)
    })?;

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: config.owner.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(transfer_msg)
        .add_attribute("action", "emergency_withdraw")
        .add_attribute("recipient", config.owner)
        .add_attribute("amount", amount)
        .add_attribute("faucet_balance", new_balance))
}
