use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address; defaults to the instantiating sender
    pub owner: Option<String>,
    /// CW20 token the faucet pays out
    pub token: String,
    /// Address allowed to claim on behalf of users
    pub claim_agent: Option<String>,
    /// Cooldown override in seconds (default 24h)
    pub cooldown_period: Option<u64>,
    /// Minimum claim override in basis points (default 10 = 0.1%)
    pub min_claim_bps: Option<u64>,
    /// Maximum claim override in basis points (default 2000 = 20%)
    pub max_claim_bps: Option<u64>,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// CW20 receive hook. Funding is a `Send` of the faucet token carrying `ReceiveMsg::Fund`.
    Receive(cw20::Cw20ReceiveMsg),
    /// Claim `amount` tokens for the sender.
    ///
    /// The amount must lie within the claim limits of the current balance and the
    /// sender's cooldown must have elapsed.
    Claim { amount: Uint128 },
    /// Claim `percentage`% of the current balance for `recipient`.
    ///
    /// Authorization: owner or claim agent. The recipient's cooldown applies.
    ClaimFor { recipient: String, percentage: u8 },
    /// Owner: replace the cooldown period
    SetCooldownPeriod { seconds: u64 },
    /// Owner: replace both claim bounds (basis points of the live balance)
    SetClaimLimits { min_bps: u64, max_bps: u64 },
    /// Owner: set or clear the claim agent
    SetClaimAgent { agent: Option<String> },
    /// Owner: withdraw `amount` to the owner without claim checks
    EmergencyWithdraw { amount: Uint128 },
    /// Owner: hand ownership to another address
    TransferOwnership { new_owner: String },
}

/// Payload of a CW20 `Send` to the faucet
#[cw_serde]
pub enum ReceiveMsg {
    Fund {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(BalanceResponse)]
    FaucetBalance {},
    #[returns(CooldownPeriodResponse)]
    CooldownPeriod {},
    #[returns(ClaimLimitsResponse)]
    ClaimLimits {},
    /// Smallest and largest claim accepted at the current balance
    #[returns(ClaimBoundsResponse)]
    ClaimBounds {},
    /// Timestamp (seconds) of the user's last claim, 0 if never claimed
    #[returns(LastClaimResponse)]
    LastClaim { user: String },
    #[returns(TimeUntilNextClaimResponse)]
    TimeUntilNextClaim { user: String },
    #[returns(AccountStatsResponse)]
    AccountStats { user: String },
    #[returns(StatsResponse)]
    Stats {},
    /// Claims newest first, starting below `start_before` when given
    #[returns(ClaimsResponse)]
    RecentClaims {
        start_before: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub token: Addr,
    pub claim_agent: Option<Addr>,
    pub cooldown_period: u64,
    pub min_claim_bps: u64,
    pub max_claim_bps: u64,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct CooldownPeriodResponse {
    pub seconds: u64,
}

#[cw_serde]
pub struct ClaimLimitsResponse {
    pub min_bps: u64,
    pub max_bps: u64,
}

#[cw_serde]
pub struct ClaimBoundsResponse {
    pub balance: Uint128,
    pub min_amount: Uint128,
    pub max_amount: Uint128,
}

#[cw_serde]
pub struct LastClaimResponse {
    pub last_claim: u64,
}

#[cw_serde]
pub struct TimeUntilNextClaimResponse {
    /// Seconds until the user may claim again (0 = eligible now)
    pub remaining_seconds: u64,
    /// Timestamp the user becomes eligible (0 = never claimed)
    pub claimable_at: u64,
}

#[cw_serde]
pub struct AccountStatsResponse {
    pub user: Addr,
    pub total_claimed: Uint128,
    pub claim_count: u64,
    pub first_claim: u64,
    pub last_claim: u64,
    pub average_claim: Uint128,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_claims: u64,
    pub total_claimed: Uint128,
    pub total_funded: Uint128,
    pub total_withdrawn: Uint128,
}

#[cw_serde]
pub struct ClaimResponse {
    pub id: u64,
    pub claimer: Addr,
    pub amount: Uint128,
    pub balance_before: Uint128,
    pub timestamp: u64,
    pub via_agent: bool,
}

#[cw_serde]
pub struct ClaimsResponse {
    pub claims: Vec<ClaimResponse>,
}
