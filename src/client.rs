use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::RecoveryConfig;
use crate::error::AppError;
use crate::types::{RawTransaction, WalletTransaction};

/// Read-only source of wallet transaction data. The recovery engine only
/// ever talks to this interface, so tests can substitute an in-memory fake.
pub trait WalletData {
    /// Returns all transactions known to the wallet.
    fn list_transactions(&self) -> Result<Vec<WalletTransaction>, AppError>;

    /// Returns the full decoded detail of one transaction by id.
    fn raw_transaction(&self, txid: &str) -> Result<RawTransaction, AppError>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a bwt (bitcoin wallet tracker) instance.
pub struct BwtClient {
    base: String,
    http: reqwest::blocking::Client,
}

impl BwtClient {
    /// Builds a client and probes the transaction list once, so connection
    /// problems surface at startup instead of mid-recovery.
    pub fn connect(config: &RecoveryConfig) -> Result<Self, AppError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let client = BwtClient {
            base: config.bwt_base(),
            http,
        };

        client.list_transactions()?;
        log::info!("connected to bwt at {}", client.base);

        Ok(client)
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base, endpoint);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            return Err(AppError::SourceStatus(response.status()));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl WalletData for BwtClient {
    fn list_transactions(&self) -> Result<Vec<WalletTransaction>, AppError> {
        self.get_json("txs")
    }

    fn raw_transaction(&self, txid: &str) -> Result<RawTransaction, AppError> {
        self.get_json(&format!("tx/{}/verbose", txid))
    }
}
