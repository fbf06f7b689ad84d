// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod advisor;
pub mod cli;
pub mod commands;
pub mod db;
pub mod engine;
pub mod error;
pub mod goals;
pub mod models;
pub mod source;
pub mod utils;
