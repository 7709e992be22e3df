//! Faucet access seam.
//!
//! The tool service talks to the faucet only through [`FaucetLedger`], so it can
//! run against the LCD client in production and an in-memory ledger in tests.

use async_trait::async_trait;
use cosmwasm_std::Uint128;
use eyre::Result;
use mystery_box_faucet::msg::{
    AccountStatsResponse, ClaimResponse, ConfigResponse, TimeUntilNextClaimResponse,
};

/// Page size used when walking the claim history
pub const HISTORY_PAGE_SIZE: u32 = 30;

/// A broadcast transaction accepted by the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxResult {
    pub hash: String,
    /// False when the tx was accepted into the mempool but never seen in a
    /// block before confirmation polling gave up; it may still fail there.
    pub confirmed: bool,
}

#[async_trait]
pub trait FaucetLedger: Send + Sync {
    async fn config(&self) -> Result<ConfigResponse>;

    async fn faucet_balance(&self) -> Result<Uint128>;

    /// Decimals of the faucet token, for display
    async fn token_decimals(&self) -> Result<u8>;

    async fn time_until_next_claim(&self, user: &str) -> Result<TimeUntilNextClaimResponse>;

    /// Lifetime totals for `user`; zeroes if they never claimed
    async fn account_stats(&self, user: &str) -> Result<AccountStatsResponse>;

    /// Claims newest first, starting below `start_before`
    async fn claims_page(
        &self,
        start_before: Option<u64>,
        limit: u32,
    ) -> Result<Vec<ClaimResponse>>;

    /// Submit `ClaimFor`
    async fn claim_for(&self, recipient: &str, percentage: u8) -> Result<TxResult>;

    /// Send `amount` of the faucet token to the faucet
    async fn fund(&self, amount: Uint128) -> Result<TxResult>;

    /// Submit `EmergencyWithdraw`
    async fn emergency_withdraw(&self, amount: Uint128) -> Result<TxResult>;

    /// Up to `limit` most recent claims, following pagination.
    async fn recent_claims(&self, limit: usize) -> Result<Vec<ClaimResponse>> {
        let mut claims = Vec::with_capacity(limit);
        let mut start_before = None;

        while claims.len() < limit {
            let want = (limit - claims.len()).min(HISTORY_PAGE_SIZE as usize) as u32;
            let page = self.claims_page(start_before, want).await?;
            let Some(last) = page.last() else {
                break;
            };
            start_before = Some(last.id);
            let exhausted = page.len() < want as usize;
            claims.extend(page);
            if exhausted {
                break;
            }
        }

        Ok(claims)
    }
}
