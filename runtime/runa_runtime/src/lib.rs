// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

//! Support library linked into every Runa executable.

pub mod abi;
pub mod error;
pub mod list;
pub mod math;
pub mod system;

pub use error::*;
pub use list::RunaList;
pub use math::FIXED_POINT_SCALE;
