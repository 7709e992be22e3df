//! Claim handlers.
//!
//! Both paths validate against the faucet balance at execution time, never
//! against an amount the caller computed earlier.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, StdError, Uint128,
    WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::ledger::{amount_for_percentage, check_claim_amount, check_cooldown};
use crate::state::{
    ClaimRecord, Config, FaucetAccount, ACCOUNTS, BALANCE, CLAIMS, CONFIG, NEXT_CLAIM_ID, STATS,
};

/// Claim `amount` for the sender.
pub fn execute_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    pay_claim(deps, &env, &config, info.sender, amount, false)
}

/// Claim a percentage of the live balance for `recipient` (owner or claim agent only).
pub fn execute_claim_for(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    percentage: u8,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let is_agent = config.claim_agent.as_ref() == Some(&info.sender);
    if info.sender != config.owner && !is_agent {
        return Err(ContractError::UnauthorizedAgent);
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    let balance = BALANCE.load(deps.storage)?;
    let amount = amount_for_percentage(balance, percentage)?;

    let res = pay_claim(deps, &env, &config, recipient, amount, true)?;
    Ok(res
        .add_attribute("percentage", percentage.to_string())
        .add_attribute("submitted_by", info.sender))
}

fn pay_claim(
    deps: DepsMut,
    env: &Env,
    config: &Config,
    claimer: Addr,
    amount: Uint128,
    via_agent: bool,
) -> Result<Response, ContractError> {
    let balance = BALANCE.load(deps.storage)?;
    check_claim_amount(amount, balance, config.min_claim_bps, config.max_claim_bps)?;

    let now = env.block.time.seconds();
    let account = ACCOUNTS.may_load(deps.storage, &claimer)?;
    check_cooldown(account.as_ref(), config.cooldown_period, now)?;

    let new_balance = balance
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientFunds {
            available: balance,
            requested: amount,
        })?;
    BALANCE.save(deps.storage, &new_balance)?;

    let account = match account {
        Some(mut account) => {
            account.last_claim_timestamp = now;
            account.total_claimed += amount;
            account.claim_count += 1;
            account
        }
        None => FaucetAccount {
            first_claim_timestamp: now,
            last_claim_timestamp: now,
            total_claimed: amount,
            claim_count: 1,
        },
    };
    ACCOUNTS.save(deps.storage, &claimer, &account)?;

    let claim_id = NEXT_CLAIM_ID.load(deps.storage)?;
    NEXT_CLAIM_ID.save(deps.storage, &(claim_id + 1))?;
    CLAIMS.save(
        deps.storage,
        claim_id,
        &ClaimRecord {
            id: claim_id,
            claimer: claimer.clone(),
            amount,
            balance_before: balance,
            timestamp: now,
            via_agent,
        },
    )?;

    STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
        stats.total_claims += 1;
        stats.total_claimed = stats.total_claimed.checked_add(amount)?;
        Ok(stats)
    })?;

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: claimer.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(transfer_msg)
        .add_attribute("action", "claim")
        .add_attribute("claimer", claimer)
        .add_attribute("amount", amount)
        .add_attribute("claim_id", claim_id.to_string())
        .add_attribute("faucet_balance", new_balance)
        .add_attribute("via_agent", via_agent.to_string()))
}
