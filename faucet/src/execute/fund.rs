//! Funding handler.
//!
//! Tokens arrive through the CW20 `Send` hook, so the token contract has
//! already moved them into faucet custody when this runs.

use cosmwasm_std::{DepsMut, MessageInfo, Response, StdError, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::state::{BALANCE, CONFIG, STATS};

pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // info.sender is the token contract, cw20_msg.sender is the funder
    if info.sender != config.token {
        return Err(ContractError::InvalidToken {
            expected: config.token.to_string(),
            got: info.sender.to_string(),
        });
    }

    let funder = deps.api.addr_validate(&cw20_msg.sender)?;
    let receive_msg: ReceiveMsg = cosmwasm_std::from_json(&cw20_msg.msg)?;

    match receive_msg {
        ReceiveMsg::Fund {} => fund_faucet(deps, funder.to_string(), cw20_msg.amount),
    }
}

fn fund_faucet(deps: DepsMut, funder: String, amount: Uint128) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "funding amount must be greater than zero".to_string(),
        });
    }

    let balance = BALANCE.update(deps.storage, |balance| -> Result<_, StdError> {
        Ok(balance.checked_add(amount)?)
    })?;

    STATS.update(deps.storage, |mut stats| -> Result<_, StdError> {
        stats.total_funded = stats.total_funded.checked_add(amount)?;
        Ok(stats)
    })?;

    Ok(Response::new()
        .add_attribute("action", "fund")
        .add_attribute("funder", funder)
        .add_attribute("amount", amount)
        .add_attribute("faucet_balance", balance))
}
