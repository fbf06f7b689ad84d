// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid reference date '{0}', expected YYYY-MM-DD")]
    InvalidToday(String),

    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    #[error("Unknown matured-reserve policy '{0}', expected 'outflow' or 'income'")]
    InvalidPolicy(String),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unauthorized. Please log in again.")]
    Unauthorized,

    #[error("Access forbidden. You are not logged in.")]
    Forbidden,

    #[error("Server error: {0}")]
    Server(reqwest::StatusCode),

    #[error("No response from server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Error, Debug)]
pub enum GoalError {
    #[error("Goal {0} not found")]
    NotFound(i64),

    #[error("Goal target must be greater than zero")]
    InvalidTarget,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
