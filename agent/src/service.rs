//! Faucet tools exposed to the assistant
//!
//! Each tool validates its parameters, calls the ledger, and turns the outcome
//! into something a user can read. A claim rejected by the cooldown is not an
//! error from the user's point of view: it is answered with the time the
//! recipient may claim again.

use std::fmt;

use chrono::{DateTime, Utc};
use cosmwasm_std::Uint128;
use mystery_box_faucet::msg::AccountStatsResponse;
use rand::Rng;
use tracing::{info, warn};

use crate::error::ToolError;
use crate::history::{format_amount, ClaimsSummary};
use crate::ledger::{FaucetLedger, TxResult};

/// Marker of the contract's cooldown rejection in a failed tx log
const COOLDOWN_REJECTION: &str = "Cooldown period not elapsed";

/// Result of a claim submitted on a user's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Claimed {
        recipient: String,
        percentage: u8,
        tx_hash: String,
    },
    /// Accepted by the chain but not seen in a block; it may still fail
    Pending {
        recipient: String,
        percentage: u8,
        tx_hash: String,
    },
    CoolingDown {
        recipient: String,
        message: String,
    },
}

impl fmt::Display for ClaimOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Claimed {
                recipient,
                percentage,
                tx_hash,
            } => write!(
                f,
                "Successfully claimed {}% of the faucet balance for {}. Transaction hash: {}",
                percentage, recipient, tx_hash
            ),
            Self::Pending {
                recipient,
                percentage,
                tx_hash,
            } => write!(
                f,
                "Claim for {}% of the faucet balance sent for {} (tx: {}). Waiting for \
                 confirmation failed; please check the transaction status on the explorer.",
                percentage, recipient, tx_hash
            ),
            Self::CoolingDown { recipient, message } => {
                write!(f, "The user {} cannot claim yet. {}", recipient, message)
            }
        }
    }
}

pub struct FaucetToolService<L> {
    ledger: L,
    max_random_percentage: u8,
}

impl<L: FaucetLedger> FaucetToolService<L> {
    pub fn new(ledger: L, max_random_percentage: u8) -> Self {
        Self {
            ledger,
            max_random_percentage: max_random_percentage.clamp(1, 100),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Claim a percentage of the faucet balance for `recipient`. Without an
    /// explicit percentage one is drawn uniformly from `1..=max_random_percentage`.
    pub async fn claim_for_user(
        &self,
        recipient: Option<&str>,
        percentage: Option<u8>,
    ) -> Result<ClaimOutcome, ToolError> {
        let recipient = required_address(recipient, "recipient address")?;

        let percentage = match percentage {
            Some(p) if (1..=100).contains(&p) => p,
            Some(p) => {
                return Err(ToolError::InvalidParameter {
                    name: "percentage",
                    reason: format!("{} is not between 1 and 100", p),
                })
            }
            None => rand::thread_rng().gen_range(1..=self.max_random_percentage),
        };

        info!(recipient = %recipient, percentage, "Submitting claim for user");

        match self.ledger.claim_for(recipient, percentage).await {
            Ok(TxResult {
                hash,
                confirmed: true,
            }) => {
                info!(recipient = %recipient, percentage, txhash = %hash, "Claim confirmed");
                Ok(ClaimOutcome::Claimed {
                    recipient: recipient.to_string(),
                    percentage,
                    tx_hash: hash,
                })
            }
            Ok(TxResult {
                hash,
                confirmed: false,
            }) => {
                warn!(
                    recipient = %recipient,
                    percentage,
                    txhash = %hash,
                    "Claim sent but not confirmed"
                );
                Ok(ClaimOutcome::Pending {
                    recipient: recipient.to_string(),
                    percentage,
                    tx_hash: hash,
                })
            }
            Err(e) if format!("{:#}", e).contains(COOLDOWN_REJECTION) => {
                warn!(recipient = %recipient, "Claim rejected by cooldown");
                let message = self.time_until_next_claim(Some(recipient)).await?;
                Ok(ClaimOutcome::CoolingDown {
                    recipient: recipient.to_string(),
                    message,
                })
            }
            Err(e) => {
                warn!(recipient = %recipient, error = %e, "Claim failed");
                Err(ToolError::ledger(format!("claim tokens for {}", recipient), &e))
            }
        }
    }

    /// Send `amount` base units from the agent wallet into the faucet.
    pub async fn fund_faucet(&self, amount: Option<Uint128>) -> Result<TxResult, ToolError> {
        let amount = required_amount(amount)?;
        info!(amount = %amount, "Funding faucet");
        self.ledger
            .fund(amount)
            .await
            .map_err(|e| ToolError::ledger("fund faucet", &e))
    }

    /// Withdraw `amount` base units to the owner; the agent wallet must be the owner.
    pub async fn emergency_withdraw(
        &self,
        amount: Option<Uint128>,
    ) -> Result<TxResult, ToolError> {
        let amount = required_amount(amount)?;
        warn!(amount = %amount, "Emergency withdrawal requested");
        self.ledger
            .emergency_withdraw(amount)
            .await
            .map_err(|e| ToolError::ledger("withdraw from faucet", &e))
    }

    pub async fn faucet_balance(&self) -> Result<String, ToolError> {
        let balance = self
            .ledger
            .faucet_balance()
            .await
            .map_err(|e| ToolError::ledger("retrieve faucet balance", &e))?;
        let decimals = self
            .ledger
            .token_decimals()
            .await
            .map_err(|e| ToolError::ledger("retrieve token decimals", &e))?;

        Ok(format!(
            "Faucet balance: {} ({} base units)",
            format_amount(balance, decimals),
            balance
        ))
    }

    pub async fn time_until_next_claim(&self, user: Option<&str>) -> Result<String, ToolError> {
        let user = required_address(user, "user address")?;
        let res = self
            .ledger
            .time_until_next_claim(user)
            .await
            .map_err(|e| ToolError::ledger("get the next claim time", &e))?;

        if res.claimable_at == 0 {
            return Ok("This user has not claimed any tokens yet.".to_string());
        }
        if res.remaining_seconds == 0 {
            return Ok(format!("{} can claim now.", user));
        }

        Ok(format!(
            "{} can claim again at {} (in {}).",
            user,
            format_timestamp(res.claimable_at),
            format_duration(res.remaining_seconds)
        ))
    }

    /// Aggregate the `limit` most recent claims, highlighting `user` when given.
    pub async fn claims_summary(
        &self,
        user: Option<&str>,
        limit: usize,
    ) -> Result<ClaimsSummary, ToolError> {
        let claims = self
            .ledger
            .recent_claims(limit)
            .await
            .map_err(|e| ToolError::ledger("fetch claim history", &e))?;
        Ok(ClaimsSummary::from_claims(&claims, user))
    }

    pub async fn account_stats(&self, user: Option<&str>) -> Result<AccountStatsResponse, ToolError> {
        let user = required_address(user, "user address")?;
        self.ledger
            .account_stats(user)
            .await
            .map_err(|e| ToolError::ledger("fetch account stats", &e))
    }
}

fn required_address<'a>(
    value: Option<&'a str>,
    name: &'static str,
) -> Result<&'a str, ToolError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ToolError::MissingParameter(name))
}

fn required_amount(amount: Option<Uint128>) -> Result<Uint128, ToolError> {
    match amount {
        None => Err(ToolError::MissingParameter("amount")),
        Some(a) if a.is_zero() => Err(ToolError::InvalidParameter {
            name: "amount",
            reason: "must be greater than zero".to_string(),
        }),
        Some(a) => Ok(a),
    }
}

fn format_timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("timestamp {}", seconds))
}

/// `90061` -> `1d 1h 1m 1s`; zero units are skipped.
fn format_duration(seconds: u64) -> String {
    let units = [
        (seconds / 86_400, "d"),
        ((seconds % 86_400) / 3_600, "h"),
        ((seconds % 3_600) / 60, "m"),
        (seconds % 60, "s"),
    ];
    let parts: Vec<String> = units
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, u)| format!("{}{}", n, u))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
