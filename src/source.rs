// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where transaction lists come from. A fetch either returns the complete
//! list or an error; there is no partial result.

use std::fs;
use std::path::PathBuf;

use reqwest::StatusCode;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::db;
use crate::error::SourceError;
use crate::models::Transaction;

pub const TOKEN_ENV: &str = "BUDGETWISE_TOKEN";

pub trait TransactionSource {
    fn fetch(&self) -> Result<Vec<Transaction>, SourceError>;
}

/// The REST backend: `GET {base}/api/transactions` with a bearer token.
pub struct ApiSource {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl ApiSource {
    pub fn new(client: reqwest::blocking::Client, base_url: &str, token: &str) -> Self {
        ApiSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/transactions", self.base_url)
    }
}

pub fn check_status(status: StatusCode) -> Result<(), SourceError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(SourceError::Unauthorized),
        StatusCode::FORBIDDEN => Err(SourceError::Forbidden),
        s => Err(SourceError::Server(s)),
    }
}

impl TransactionSource for ApiSource {
    fn fetch(&self) -> Result<Vec<Transaction>, SourceError> {
        let url = self.endpoint();
        debug!(%url, "fetching transactions");
        let resp = self.client.get(&url).bearer_auth(&self.token).send()?;
        check_status(resp.status())?;
        let txs: Vec<Transaction> = resp.json()?;
        info!(count = txs.len(), "fetched transactions from api");
        Ok(txs)
    }
}

/// A JSON array of transactions, in the same shape the API returns.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }
}

impl TransactionSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<Transaction>, SourceError> {
        let raw = fs::read_to_string(&self.path)?;
        let txs: Vec<Transaction> = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), count = txs.len(), "read transactions file");
        Ok(txs)
    }
}

pub struct SqliteSource<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSource<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteSource { conn }
    }
}

impl TransactionSource for SqliteSource<'_> {
    fn fetch(&self) -> Result<Vec<Transaction>, SourceError> {
        Ok(db::all_transactions(self.conn)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED),
            Err(SourceError::Unauthorized)
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN),
            Err(SourceError::Forbidden)
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY),
            Err(SourceError::Server(StatusCode::BAD_GATEWAY))
        ));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = reqwest::blocking::Client::new();
        let src = ApiSource::new(client, "http://localhost:8080/", "t");
        assert_eq!(src.endpoint(), "http://localhost:8080/api/transactions");
    }
}
