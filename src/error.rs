// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::TransactionKind;

/// Rejections raised while turning user input into records.
///
/// The analytics engine never produces these; they only guard the boundary
/// so that the engine can assume amounts are non-negative decimals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount '{0}', expected a number")]
    InvalidAmount(String),
    #[error("Amount must not be negative, got '{0}'")]
    NegativeAmount(String),
    #[error("Amount '{0}' is out of range (at most 2 decimal places, up to 1000000000000)")]
    AmountOutOfRange(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Unknown transaction type '{0}' (use income|expense)")]
    InvalidKind(String),
    #[error("Unknown recurring frequency '{0}' (use weekly|monthly|yearly)")]
    InvalidFrequency(String),
    #[error("Category '{category}' is not an active {kind} category")]
    UnknownCategory {
        category: String,
        kind: TransactionKind,
    },
    #[error("Category '{0}' is built in and cannot be removed")]
    BuiltinCategory(String),
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("Category name must not be empty")]
    EmptyCategory,
    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),
    #[error("Invalid goal: {0}")]
    InvalidGoal(String),
}
