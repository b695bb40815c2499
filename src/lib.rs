// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod db;
pub mod models;
pub mod money;
pub mod utils;
pub mod ledger;
pub mod balance;
pub mod statement;
pub mod debts;
pub mod lifecycle;
pub mod calendar;
pub mod dashboard;
pub mod commands;
