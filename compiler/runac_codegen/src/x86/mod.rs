// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

mod x86_gen;

pub use x86_gen::*;
