// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

/// Distance in bytes below `%rbp`. A variable at offset `n` lives at `-n(%rbp)`.
pub type StackOffset = usize;

/// Numeric part of a `.L<n>` label.
pub type LabelId = usize;
