// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod db;
pub mod models;
pub mod session;
pub mod store;
pub mod agg;
pub mod advisor;
pub mod utils;
pub mod commands;
