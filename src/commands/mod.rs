// Copyright (c) 2026 Centavo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod transactions;
pub mod debts;
pub mod budgets;
pub mod fixed;
pub mod statements;
pub mod dashboard;

/// Single-profile CLI; every row is owned by this user. Multi-user access
/// control is the embedding application's concern.
pub const USER_ID: i64 = 1;
