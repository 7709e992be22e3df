//! Integration tests for the Mystery Box faucet using cw-multi-test.
//!
//! A cw20-base token with 6 decimals stands in for the faucet token; the faucet
//! is funded with 500 tokens before each scenario.

use cosmwasm_std::{to_json_binary, Addr, Uint128};
use cw20::{BalanceResponse as Cw20BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, ContractWrapper, Executor};

use mystery_box_faucet::msg::{
    AccountStatsResponse, BalanceResponse, ClaimBoundsResponse, ClaimLimitsResponse,
    ClaimsResponse, ConfigResponse, CooldownPeriodResponse, ExecuteMsg, InstantiateMsg,
    LastClaimResponse, QueryMsg, ReceiveMsg, StatsResponse, TimeUntilNextClaimResponse,
};

/// 1 token with 6 decimals
const TOKEN: u128 = 1_000_000;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_faucet() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        mystery_box_faucet::contract::execute,
        mystery_box_faucet::contract::instantiate,
        mystery_box_faucet::contract::query,
    )
    .with_migrate(mystery_box_faucet::contract::migrate);
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<cosmwasm_std::Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

struct Suite {
    app: App,
    faucet: Addr,
    token: Addr,
    owner: Addr,
    agent: Addr,
    user1: Addr,
    user2: Addr,
}

fn setup() -> Suite {
    let mut app = App::default();

    let owner = Addr::unchecked("terra1owner");
    let agent = Addr::unchecked("terra1agent");
    let user1 = Addr::unchecked("terra1user1");
    let user2 = Addr::unchecked("terra1user2");

    let cw20_code_id = app.store_code(contract_cw20());
    let token = app
        .instantiate_contract(
            cw20_code_id,
            owner.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Mock celoUSD".to_string(),
                symbol: "MCUSD".to_string(),
                decimals: 6,
                initial_balances: vec![Cw20Coin {
                    address: owner.to_string(),
                    amount: Uint128::from(1_000 * TOKEN),
                }],
                mint: None,
                marketing: None,
            },
            &[],
            "mock-cusd",
            None,
        )
        .unwrap();

    let faucet_code_id = app.store_code(contract_faucet());
    let faucet = app
        .instantiate_contract(
            faucet_code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: None,
                token: token.to_string(),
                claim_agent: Some(agent.to_string()),
                cooldown_period: None,
                min_claim_bps: None,
                max_claim_bps: None,
            },
            &[],
            "mystery-box-faucet",
            Some(owner.to_string()),
        )
        .unwrap();

    let mut env = Suite {
        app,
        faucet,
        token,
        owner,
        agent,
        user1,
        user2,
    };
    let owner = env.owner.clone();
    fund(&mut env, &owner, 500 * TOKEN).unwrap();
    env
}

fn fund(env: &mut Suite, funder: &Addr, amount: u128) -> anyhow::Result<()> {
    env.app
        .execute_contract(
            funder.clone(),
            env.token.clone(),
            &Cw20ExecuteMsg::Send {
                contract: env.faucet.to_string(),
                amount: Uint128::from(amount),
                msg: to_json_binary(&ReceiveMsg::Fund {}).unwrap(),
            },
            &[],
        )
        .map(|_| ())
}

fn claim(env: &mut Suite, user: &Addr, amount: u128) -> anyhow::Result<()> {
    env.app
        .execute_contract(
            user.clone(),
            env.faucet.clone(),
            &ExecuteMsg::Claim {
                amount: Uint128::from(amount),
            },
            &[],
        )
        .map(|_| ())
}

fn faucet_balance(env: &Suite) -> Uint128 {
    let res: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::FaucetBalance {})
        .unwrap();
    res.balance
}

fn token_balance(env: &Suite, addr: &Addr) -> Uint128 {
    let res: Cw20BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.token,
            &Cw20QueryMsg::Balance {
                address: addr.to_string(),
            },
        )
        .unwrap();
    res.balance
}

fn advance_time(env: &mut Suite, seconds: u64) {
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
        block.height += seconds / 5;
    });
}

fn expect_err(res: anyhow::Result<()>, needle: &str) {
    assert!(res.is_err(), "Expected error containing '{}'", needle);
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains(needle),
        "Expected error containing '{}', got: {}",
        needle,
        err_str
    );
}

// ============================================================================
// Funding
// ============================================================================

#[test]
fn test_faucet_balance_after_funding() {
    let env = setup();
    assert_eq!(faucet_balance(&env), Uint128::from(500 * TOKEN));
    assert_eq!(token_balance(&env, &env.faucet), Uint128::from(500 * TOKEN));
    assert_eq!(token_balance(&env, &env.owner), Uint128::from(500 * TOKEN));
}

#[test]
fn test_fund_adds_exact_amount() {
    let mut env = setup();
    let before = faucet_balance(&env);

    let owner = env.owner.clone();
    fund(&mut env, &owner, 17).unwrap();

    assert_eq!(faucet_balance(&env), before + Uint128::from(17u128));

    let stats: StatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_funded, Uint128::from(500 * TOKEN + 17));
}

#[test]
fn test_fund_beyond_funder_balance_fails() {
    let mut env = setup();
    let user1 = env.user1.clone();

    // user1 holds no tokens; the token contract rejects the send
    let res = fund(&mut env, &user1, TOKEN);
    assert!(res.is_err());
    assert_eq!(faucet_balance(&env), Uint128::from(500 * TOKEN));
}

#[test]
fn test_direct_receive_from_non_token_rejected() {
    let mut env = setup();
    let res = env
        .app
        .execute_contract(
            env.user1.clone(),
            env.faucet.clone(),
            &ExecuteMsg::Receive(cw20::Cw20ReceiveMsg {
                sender: env.user1.to_string(),
                amount: Uint128::from(1_000 * TOKEN),
                msg: to_json_binary(&ReceiveMsg::Fund {}).unwrap(),
            }),
            &[],
        )
        .map(|_| ());
    expect_err(res, "Invalid token");
    assert_eq!(faucet_balance(&env), Uint128::from(500 * TOKEN));
}

// ============================================================================
// Claims
// ============================================================================

#[test]
fn test_claim_within_limits() {
    let mut env = setup();
    let user1 = env.user1.clone();

    // 5% of the balance
    claim(&mut env, &user1, 25 * TOKEN).unwrap();

    assert_eq!(token_balance(&env, &env.user1), Uint128::from(25 * TOKEN));
    assert_eq!(faucet_balance(&env), Uint128::from(475 * TOKEN));
}

#[test]
fn test_claim_outside_percentage_limits() {
    let mut env = setup();
    let user1 = env.user1.clone();

    // 0.05% of the balance
    expect_err(claim(&mut env, &user1, TOKEN / 4), "Amount too small");

    // nothing at all is below the minimum too
    expect_err(claim(&mut env, &user1, 0), "Amount too small");

    // 25% of the balance
    expect_err(claim(&mut env, &user1, 125 * TOKEN), "Amount too large");

    assert_eq!(faucet_balance(&env), Uint128::from(500 * TOKEN));
    let last: LastClaimResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.faucet,
            &QueryMsg::LastClaim {
                user: env.user1.to_string(),
            },
        )
        .unwrap();
    assert_eq!(last.last_claim, 0);
}

#[test]
fn test_claim_bounds_follow_live_balance() {
    let mut env = setup();

    let bounds: ClaimBoundsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::ClaimBounds {})
        .unwrap();
    assert_eq!(bounds.min_amount, Uint128::from(TOKEN / 2));
    assert_eq!(bounds.max_amount, Uint128::from(100 * TOKEN));

    let user1 = env.user1.clone();
    claim(&mut env, &user1, 100 * TOKEN).unwrap();

    // 20% of 500 was valid, but the same amount is 25% of the remaining 400
    let user2 = env.user2.clone();
    expect_err(claim(&mut env, &user2, 100 * TOKEN), "Amount too large");
    claim(&mut env, &user2, 80 * TOKEN).unwrap();
    assert_eq!(faucet_balance(&env), Uint128::from(320 * TOKEN));
}

#[test]
fn test_cooldown_between_claims() {
    let mut env = setup();
    let user1 = env.user1.clone();

    claim(&mut env, &user1, 25 * TOKEN).unwrap();
    expect_err(
        claim(&mut env, &user1, 20 * TOKEN),
        "Cooldown period not elapsed",
    );

    let next: TimeUntilNextClaimResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.faucet,
            &QueryMsg::TimeUntilNextClaim {
                user: user1.to_string(),
            },
        )
        .unwrap();
    assert_eq!(next.remaining_seconds, 86_400);

    // 24h + 1s
    advance_time(&mut env, 86_401);
    claim(&mut env, &user1, 20 * TOKEN).unwrap();

    assert_eq!(token_balance(&env, &user1), Uint128::from(45 * TOKEN));
    assert_eq!(faucet_balance(&env), Uint128::from(455 * TOKEN));
}

#[test]
fn test_cooldown_is_per_account() {
    let mut env = setup();
    let user1 = env.user1.clone();
    let user2 = env.user2.clone();

    claim(&mut env, &user1, 25 * TOKEN).unwrap();
    claim(&mut env, &user2, 25 * TOKEN).unwrap();
    assert_eq!(faucet_balance(&env), Uint128::from(450 * TOKEN));
}

#[test]
fn test_cooldown_boundary_is_inclusive() {
    let mut env = setup();
    let user1 = env.user1.clone();

    claim(&mut env, &user1, 25 * TOKEN).unwrap();
    advance_time(&mut env, 86_399);
    expect_err(
        claim(&mut env, &user1, 10 * TOKEN),
        "Cooldown period not elapsed",
    );
    advance_time(&mut env, 1);
    claim(&mut env, &user1, 10 * TOKEN).unwrap();
}

// ============================================================================
// Agent Claims
// ============================================================================

#[test]
fn test_agent_claims_percentage_for_user() {
    let mut env = setup();

    env.app
        .execute_contract(
            env.agent.clone(),
            env.faucet.clone(),
            &ExecuteMsg::ClaimFor {
                recipient: env.user1.to_string(),
                percentage: 20,
            },
            &[],
        )
        .unwrap();

    assert_eq!(token_balance(&env, &env.user1), Uint128::from(100 * TOKEN));
    assert_eq!(token_balance(&env, &env.agent), Uint128::zero());

    // recipient's cooldown applies to agent claims
    let res = env
        .app
        .execute_contract(
            env.agent.clone(),
            env.faucet.clone(),
            &ExecuteMsg::ClaimFor {
                recipient: env.user1.to_string(),
                percentage: 1,
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Cooldown period not elapsed");

    // and a self claim is blocked by the same cooldown
    let user1 = env.user1.clone();
    expect_err(claim(&mut env, &user1, TOKEN), "Cooldown period not elapsed");
}

#[test]
fn test_non_agent_cannot_claim_for_user() {
    let mut env = setup();
    let res = env
        .app
        .execute_contract(
            env.user2.clone(),
            env.faucet.clone(),
            &ExecuteMsg::ClaimFor {
                recipient: env.user2.to_string(),
                percentage: 10,
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Unauthorized");
}

#[test]
fn test_invalid_percentage_rejected() {
    let mut env = setup();
    let res = env
        .app
        .execute_contract(
            env.agent.clone(),
            env.faucet.clone(),
            &ExecuteMsg::ClaimFor {
                recipient: env.user1.to_string(),
                percentage: 0,
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Invalid percentage");
}

#[test]
fn test_clearing_agent_revokes_access() {
    let mut env = setup();
    env.app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetClaimAgent { agent: None },
            &[],
        )
        .unwrap();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::Config {})
        .unwrap();
    assert!(config.claim_agent.is_none());

    let res = env
        .app
        .execute_contract(
            env.agent.clone(),
            env.faucet.clone(),
            &ExecuteMsg::ClaimFor {
                recipient: env.user1.to_string(),
                percentage: 5,
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Unauthorized");
}

// ============================================================================
// Owner Parameters
// ============================================================================

#[test]
fn test_owner_updates_parameters() {
    let mut env = setup();

    env.app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetCooldownPeriod { seconds: 3600 },
            &[],
        )
        .unwrap();
    let cooldown: CooldownPeriodResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::CooldownPeriod {})
        .unwrap();
    assert_eq!(cooldown.seconds, 3600);

    // 0.5% to 30%
    env.app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetClaimLimits {
                min_bps: 50,
                max_bps: 3_000,
            },
            &[],
        )
        .unwrap();
    let limits: ClaimLimitsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::ClaimLimits {})
        .unwrap();
    assert_eq!(limits.min_bps, 50);
    assert_eq!(limits.max_bps, 3_000);

    // 25% is now within limits, and the shorter cooldown applies
    let user1 = env.user1.clone();
    claim(&mut env, &user1, 125 * TOKEN).unwrap();
    advance_time(&mut env, 3600);
    claim(&mut env, &user1, 10 * TOKEN).unwrap();
}

#[test]
fn test_non_owner_cannot_update_parameters() {
    let mut env = setup();

    let res = env
        .app
        .execute_contract(
            env.user1.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetCooldownPeriod { seconds: 3600 },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Unauthorized");

    let res = env
        .app
        .execute_contract(
            env.user1.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetClaimLimits {
                min_bps: 50,
                max_bps: 3_000,
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Unauthorized");

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.cooldown_period, 86_400);
    assert_eq!(config.min_claim_bps, 10);
    assert_eq!(config.max_claim_bps, 2_000);
}

#[test]
fn test_inverted_claim_limits_rejected() {
    let mut env = setup();
    let res = env
        .app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetClaimLimits {
                min_bps: 3_000,
                max_bps: 50,
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Invalid claim limits");
}

#[test]
fn test_transfer_ownership() {
    let mut env = setup();
    env.app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::TransferOwnership {
                new_owner: env.user2.to_string(),
            },
            &[],
        )
        .unwrap();

    let res = env
        .app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetCooldownPeriod { seconds: 60 },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Unauthorized");

    env.app
        .execute_contract(
            env.user2.clone(),
            env.faucet.clone(),
            &ExecuteMsg::SetCooldownPeriod { seconds: 60 },
            &[],
        )
        .unwrap();
}

// ============================================================================
// Emergency Withdrawal
// ============================================================================

#[test]
fn test_emergency_withdraw_bypasses_claim_rules() {
    let mut env = setup();

    // 60% of the balance, well above the claim maximum
    env.app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::EmergencyWithdraw {
                amount: Uint128::from(300 * TOKEN),
            },
            &[],
        )
        .unwrap();

    assert_eq!(faucet_balance(&env), Uint128::from(200 * TOKEN));
    assert_eq!(token_balance(&env, &env.owner), Uint128::from(800 * TOKEN));

    let stats: StatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(stats.total_withdrawn, Uint128::from(300 * TOKEN));
    assert_eq!(stats.total_claims, 0);

    // not a claim, so the owner can still claim normally
    let owner = env.owner.clone();
    claim(&mut env, &owner, 10 * TOKEN).unwrap();
}

#[test]
fn test_emergency_withdraw_limits() {
    let mut env = setup();

    let res = env
        .app
        .execute_contract(
            env.user1.clone(),
            env.faucet.clone(),
            &ExecuteMsg::EmergencyWithdraw {
                amount: Uint128::from(TOKEN),
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Unauthorized");

    let res = env
        .app
        .execute_contract(
            env.owner.clone(),
            env.faucet.clone(),
            &ExecuteMsg::EmergencyWithdraw {
                amount: Uint128::from(501 * TOKEN),
            },
            &[],
        )
        .map(|_| ());
    expect_err(res, "Insufficient funds");
    assert_eq!(faucet_balance(&env), Uint128::from(500 * TOKEN));
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_account_stats_and_recent_claims() {
    let mut env = setup();
    let user1 = env.user1.clone();
    let user2 = env.user2.clone();

    claim(&mut env, &user1, 25 * TOKEN).unwrap();
    claim(&mut env, &user2, 10 * TOKEN).unwrap();
    advance_time(&mut env, 86_400);
    claim(&mut env, &user1, 15 * TOKEN).unwrap();

    let stats: AccountStatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.faucet,
            &QueryMsg::AccountStats {
                user: user1.to_string(),
            },
        )
        .unwrap();
    assert_eq!(stats.claim_count, 2);
    assert_eq!(stats.total_claimed, Uint128::from(40 * TOKEN));
    assert_eq!(stats.average_claim, Uint128::from(20 * TOKEN));
    assert_eq!(stats.last_claim - stats.first_claim, 86_400);

    let page: ClaimsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.faucet,
            &QueryMsg::RecentClaims {
                start_before: None,
                limit: Some(2),
            },
        )
        .unwrap();
    let ids: Vec<u64> = page.claims.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(page.claims[0].claimer, user1);
    assert_eq!(page.claims[0].balance_before, Uint128::from(465 * TOKEN));

    let next: ClaimsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.faucet,
            &QueryMsg::RecentClaims {
                start_before: Some(1),
                limit: Some(2),
            },
        )
        .unwrap();
    assert_eq!(next.claims.len(), 1);
    assert_eq!(next.claims[0].id, 0);

    let global: StatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.faucet, &QueryMsg::Stats {})
        .unwrap();
    assert_eq!(global.total_claims, 3);
    assert_eq!(global.total_claimed, Uint128::from(50 * TOKEN));
}

#[test]
fn test_unknown_account_stats_are_zero() {
    let env = setup();
    let stats: AccountStatsResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.faucet,
            &QueryMsg::AccountStats {
                user: env.user2.to_string(),
            },
        )
        .unwrap();
    assert_eq!(stats.claim_count, 0);
    assert_eq!(stats.average_claim, Uint128::zero());
}
