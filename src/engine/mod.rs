// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure analytics over a snapshot of records. Nothing here touches storage,
//! reads the clock, or mutates its inputs; time-sensitive functions take
//! `now` explicitly.

pub mod budget;
pub mod filter;
pub mod goals;
pub mod insights;
pub mod range;
pub mod rollup;
