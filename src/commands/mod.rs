// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod advisor;
pub mod credit;
pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod loans;
pub mod transactions;
pub mod users;
