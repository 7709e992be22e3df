//! LCD client for the faucet contract
//!
//! Signs `MsgExecuteContract` transactions with cosmrs and broadcasts them via
//! the LCD REST API, trying fallback endpoints when the primary fails. Queries
//! go through the LCD smart-query endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bip39::Mnemonic;
use cosmrs::{
    bip32::DerivationPath,
    crypto::secp256k1::SigningKey,
    tx::{self, Fee, Msg, SignDoc, SignerInfo},
    AccountId, Coin,
};
use cosmwasm_std::{to_json_binary, Uint128};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};
use eyre::{eyre, Result, WrapErr};
use mystery_box_faucet::msg::{
    AccountStatsResponse, BalanceResponse, ClaimResponse, ClaimsResponse, ConfigResponse,
    ExecuteMsg, QueryMsg, ReceiveMsg, TimeUntilNextClaimResponse,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::ledger::{FaucetLedger, TxResult};

/// Account info from LCD
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub sequence: u64,
    pub account_number: u64,
}

/// Client bound to one faucet contract and one signing key
pub struct LcdFaucetClient {
    /// Primary LCD URL
    lcd_url: String,
    /// Fallback LCD URLs for broadcasting
    fallback_urls: Vec<String>,
    chain_id: String,
    signing_key: SigningKey,
    /// Agent wallet address
    pub address: AccountId,
    faucet_address: String,
    fee_denom: String,
    gas_price: f64,
    gas_limit: u64,
    client: Client,
}

impl LcdFaucetClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("Failed to create HTTP client")?;

        let mnemonic =
            Mnemonic::parse(&config.mnemonic).map_err(|e| eyre!("Invalid mnemonic: {}", e))?;
        let seed = mnemonic.to_seed("");
        let path: DerivationPath = config
            .derivation_path
            .parse()
            .map_err(|e| eyre!("Invalid derivation path: {:?}", e))?;

        let signing_key = SigningKey::derive_from_path(seed, &path)
            .map_err(|e| eyre!("Failed to derive signing key: {}", e))?;

        let address = signing_key
            .public_key()
            .account_id(&config.account_prefix)
            .map_err(|e| eyre!("Failed to get account ID: {}", e))?;

        let lcd_url = config.lcd_url.trim_end_matches('/').to_string();
        let fallback_urls = config
            .fallback_lcd_urls
            .iter()
            .filter(|u| **u != lcd_url)
            .cloned()
            .collect();

        info!(
            address = %address,
            chain_id = %config.chain_id,
            faucet = %config.faucet_address,
            "Faucet client initialized"
        );

        Ok(Self {
            lcd_url,
            fallback_urls,
            chain_id: config.chain_id.clone(),
            signing_key,
            address,
            faucet_address: config.faucet_address.clone(),
            fee_denom: config.fee_denom.clone(),
            gas_price: config.gas_price,
            gas_limit: config.gas_limit,
            client,
        })
    }

    pub fn faucet_address(&self) -> &str {
        &self.faucet_address
    }

    /// Get account info (sequence and account number)
    pub async fn get_account_info(&self) -> Result<AccountInfo> {
        let url = format!(
            "{}/cosmos/auth/v1beta1/accounts/{}",
            self.lcd_url, self.address
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .wrap_err("Failed to query account info")?;

        if !response.status().is_success() {
            return Err(eyre!(
                "Account query failed: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            ));
        }

        let data: serde_json::Value = response.json().await?;
        let account = data
            .get("account")
            .ok_or_else(|| eyre!("Missing 'account' field in response"))?;
        parse_account_info(account)
    }

    /// Sign and broadcast an execute message with retry on sequence mismatch
    pub async fn execute_contract(
        &self,
        contract_address: &str,
        msg: &impl Serialize,
    ) -> Result<TxResult> {
        const MAX_RETRIES: u32 = 3;
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match self.execute_contract_inner(contract_address, msg).await {
                Ok(tx) => return Ok(tx),
                Err(e) => {
                    if !is_sequence_mismatch(&e.to_string()) {
                        return Err(e);
                    }

                    warn!(
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        error = %e,
                        "Sequence mismatch detected, refreshing account info and retrying"
                    );

                    let delay = Duration::from_millis(500 * (1 << attempt));
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| eyre!("execute_contract failed after {} retries", MAX_RETRIES)))
    }

    async fn execute_contract_inner(
        &self,
        contract_address: &str,
        msg: &impl Serialize,
    ) -> Result<TxResult> {
        let account_info = self.get_account_info().await?;
        debug!(
            sequence = account_info.sequence,
            account_number = account_info.account_number,
            "Got account info for signing"
        );

        let execute_msg = cosmrs::cosmwasm::MsgExecuteContract {
            sender: self.address.clone(),
            contract: contract_address
                .parse()
                .map_err(|e| eyre!("Invalid contract address: {:?}", e))?,
            msg: serde_json::to_vec(msg)?,
            funds: vec![],
        };

        let body = tx::Body::new(
            vec![execute_msg
                .to_any()
                .map_err(|e| eyre!("Failed to convert message: {}", e))?],
            "",
            0u32,
        );

        let signer_info =
            SignerInfo::single_direct(Some(self.signing_key.public_key()), account_info.sequence);
        let fee = Fee::from_amount_and_gas(
            Coin {
                denom: self
                    .fee_denom
                    .parse()
                    .map_err(|e| eyre!("Invalid fee denom '{}': {}", self.fee_denom, e))?,
                amount: fee_amount(self.gas_limit, self.gas_price),
            },
            self.gas_limit,
        );
        let auth_info = signer_info.auth_info(fee);

        let chain_id = self
            .chain_id
            .parse()
            .map_err(|_| eyre!("Invalid chain ID"))?;
        let sign_doc = SignDoc::new(&body, &auth_info, &chain_id, account_info.account_number)
            .map_err(|e| eyre!("Failed to create sign doc: {}", e))?;

        let tx_raw = sign_doc
            .sign(&self.signing_key)
            .map_err(|e| eyre!("Failed to sign transaction: {}", e))?;
        let tx_bytes = tx_raw
            .to_bytes()
            .map_err(|e| eyre!("Failed to serialize transaction: {}", e))?;

        self.broadcast_tx(&tx_bytes).await
    }

    /// Broadcast a signed transaction and wait for it to land in a block.
    ///
    /// A tx that fails in the block is an error. A tx that is still not in a
    /// block when polling gives up comes back unconfirmed.
    async fn broadcast_tx(&self, tx_bytes: &[u8]) -> Result<TxResult> {
        let urls: Vec<&str> = std::iter::once(self.lcd_url.as_str())
            .chain(self.fallback_urls.iter().map(|s| s.as_str()))
            .collect();

        let tx_b64 = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, tx_bytes);
        let broadcast_request = serde_json::json!({
            "tx_bytes": tx_b64,
            "mode": "BROADCAST_MODE_SYNC"
        });

        let mut last_error = None;

        for base_url in urls {
            let broadcast_url = format!("{}/cosmos/tx/v1beta1/txs", base_url);
            info!(url = %broadcast_url, tx_bytes_len = tx_bytes.len(), "Broadcasting transaction");

            let response = match self
                .client
                .post(&broadcast_url)
                .json(&broadcast_request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(url = %base_url, error = %e, "Failed to broadcast to endpoint");
                    last_error = Some(eyre!("Network error: {}", e));
                    continue;
                }
            };

            let status = response.status();
            let body: serde_json::Value = response
                .json()
                .await
                .unwrap_or_else(|_| serde_json::json!({"error": "Failed to parse response"}));
            debug!(status = %status, body = %body, "Broadcast response received");

            let Some(tx_response) = body.get("tx_response").filter(|_| status.is_success())
            else {
                last_error = Some(eyre!("Broadcast failed: {}", body));
                continue;
            };

            // CheckTx rejections (including contract errors) are final, not endpoint problems
            let txhash = tx_outcome(tx_response)?;
            info!(txhash = %txhash, "Transaction accepted, waiting for confirmation");

            let confirmation = self.wait_for_tx_confirmation(&txhash, base_url).await;
            return confirmation_result(txhash, confirmation);
        }

        Err(last_error.unwrap_or_else(|| eyre!("All broadcast attempts failed")))
    }

    /// Poll until the transaction is in a block, backing off from 500ms to 3s for up to 30s.
    async fn wait_for_tx_confirmation(&self, txhash: &str, base_url: &str) -> Result<()> {
        let timeout = Duration::from_secs(30);
        let max_delay = Duration::from_secs(3);
        let mut delay = Duration::from_millis(500);
        let start = Instant::now();

        let tx_url = format!("{}/cosmos/tx/v1beta1/txs/{}", base_url, txhash);

        while start.elapsed() < timeout {
            tokio::time::sleep(delay).await;

            match self.client.get(&tx_url).send().await {
                Ok(response) if response.status().is_success() => {
                    let body: serde_json::Value = response.json().await.unwrap_or_default();
                    if let Some(tx_response) = body.get("tx_response") {
                        return tx_outcome(tx_response)
                            .map(|_| ())
                            .map_err(|e| eyre!("Transaction failed in block: {}", e));
                    }
                }
                Ok(response) => {
                    debug!(
                        txhash = %txhash,
                        status = %response.status(),
                        elapsed_ms = start.elapsed().as_millis(),
                        "Transaction not yet in block"
                    );
                }
                Err(e) => {
                    warn!(txhash = %txhash, error = %e, "Error querying transaction status");
                }
            }

            delay = std::cmp::min(delay * 2, max_delay);
        }

        Err(eyre!(
            "Timeout waiting for transaction {} to be confirmed",
            txhash
        ))
    }

    /// Query a smart contract
    pub async fn query_contract<T: for<'de> Deserialize<'de>>(
        &self,
        contract_address: &str,
        query_msg: &impl Serialize,
    ) -> Result<T> {
        let query_json = serde_json::to_string(query_msg)?;
        let query_b64 =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, query_json);

        let url = format!(
            "{}/cosmwasm/wasm/v1/contract/{}/smart/{}",
            self.lcd_url, contract_address, query_b64
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .wrap_err("Failed to query contract")?;

        if !response.status().is_success() {
            return Err(eyre!(
                "Query failed: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            ));
        }

        let data: serde_json::Value = response.json().await?;
        let query_data = data
            .get("data")
            .ok_or_else(|| eyre!("Missing 'data' field in response"))?;

        serde_json::from_value(query_data.clone())
            .map_err(|e| eyre!("Failed to parse response: {}", e))
    }

    async fn query_faucet<T: for<'de> Deserialize<'de>>(&self, msg: &QueryMsg) -> Result<T> {
        self.query_contract(&self.faucet_address, msg).await
    }
}

#[async_trait]
impl FaucetLedger for LcdFaucetClient {
    async fn config(&self) -> Result<ConfigResponse> {
        self.query_faucet(&QueryMsg::Config {}).await
    }

    async fn faucet_balance(&self) -> Result<Uint128> {
        let res: BalanceResponse = self.query_faucet(&QueryMsg::FaucetBalance {}).await?;
        Ok(res.balance)
    }

    async fn token_decimals(&self) -> Result<u8> {
        let config = self.config().await?;
        let info: TokenInfoResponse = self
            .query_contract(config.token.as_str(), &Cw20QueryMsg::TokenInfo {})
            .await?;
        Ok(info.decimals)
    }

    async fn time_until_next_claim(&self, user: &str) -> Result<TimeUntilNextClaimResponse> {
        self.query_faucet(&QueryMsg::TimeUntilNextClaim {
            user: user.to_string(),
        })
        .await
    }

    async fn account_stats(&self, user: &str) -> Result<AccountStatsResponse> {
        self.query_faucet(&QueryMsg::AccountStats {
            user: user.to_string(),
        })
        .await
    }

    async fn claims_page(
        &self,
        start_before: Option<u64>,
        limit: u32,
    ) -> Result<Vec<ClaimResponse>> {
        let res: ClaimsResponse = self
            .query_faucet(&QueryMsg::RecentClaims {
                start_before,
                limit: Some(limit),
            })
            .await?;
        Ok(res.claims)
    }

    async fn claim_for(&self, recipient: &str, percentage: u8) -> Result<TxResult> {
        let msg = ExecuteMsg::ClaimFor {
            recipient: recipient.to_string(),
            percentage,
        };
        self.execute_contract(&self.faucet_address, &msg)
            .await
            .wrap_err_with(|| format!("ClaimFor {}% for {}", percentage, recipient))
    }

    async fn fund(&self, amount: Uint128) -> Result<TxResult> {
        let config = self.config().await?;
        let msg = Cw20ExecuteMsg::Send {
            contract: self.faucet_address.clone(),
            amount,
            msg: to_json_binary(&ReceiveMsg::Fund {})?,
        };
        self.execute_contract(config.token.as_str(), &msg)
            .await
            .wrap_err_with(|| format!("Fund faucet with {}", amount))
    }

    async fn emergency_withdraw(&self, amount: Uint128) -> Result<TxResult> {
        let msg = ExecuteMsg::EmergencyWithdraw { amount };
        self.execute_contract(&self.faucet_address, &msg)
            .await
            .wrap_err_with(|| format!("EmergencyWithdraw {}", amount))
    }
}

/// Read sequence and account number from either a base or a vesting account.
fn parse_account_info(account: &serde_json::Value) -> Result<AccountInfo> {
    let field = |name: &str| -> Result<u64> {
        account
            .get(name)
            .or_else(|| account.get("base_account").and_then(|b| b.get(name)))
            .and_then(|v| v.as_str())
            .unwrap_or("0")
            .parse()
            .map_err(|e| eyre!("Invalid {} in account response: {}", name, e))
    };

    Ok(AccountInfo {
        sequence: field("sequence")?,
        account_number: field("account_number")?,
    })
}

/// Tx hash of a successful `tx_response`, or its `raw_log` as the error.
fn tx_outcome(tx_response: &serde_json::Value) -> Result<String> {
    let code = tx_response
        .get("code")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    if code != 0 {
        let raw_log = tx_response
            .get("raw_log")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        return Err(eyre!("Transaction failed (code {}): {}", code, raw_log));
    }

    Ok(tx_response
        .get("txhash")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string())
}

/// Classify the confirmation wait: a failure in the block is an error, a
/// timeout leaves the tx unconfirmed.
fn confirmation_result(txhash: String, confirmation: Result<()>) -> Result<TxResult> {
    match confirmation {
        Ok(()) => {
            info!(txhash = %txhash, "Transaction confirmed in block");
            Ok(TxResult {
                hash: txhash,
                confirmed: true,
            })
        }
        Err(e) if e.to_string().contains("failed in block") => Err(e),
        Err(e) => {
            warn!(txhash = %txhash, error = %e, "Confirmation timed out; broadcast was accepted");
            Ok(TxResult {
                hash: txhash,
                confirmed: false,
            })
        }
    }
}

fn is_sequence_mismatch(error: &str) -> bool {
    error.contains("account sequence mismatch")
        || error.contains("code 32")
        || error.contains("incorrect account sequence")
}

fn fee_amount(gas_limit: u64, gas_price: f64) -> u128 {
    ((gas_limit as f64) * gas_price).ceil() as u128
}
