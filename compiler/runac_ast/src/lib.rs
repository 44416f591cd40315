// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod expr;
mod operation;
mod program;
mod stmt;

pub use expr::*;
pub use operation::*;
pub use program::*;
pub use stmt::*;
