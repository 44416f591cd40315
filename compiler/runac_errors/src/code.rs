// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrCode {
    /// Output could not be opened or written
    IO0001      = 1,

    /// Symbol not found
    SEM2000     = 2000,

    /// Symbol already defined
    SEM2001     = 2001,

    /// `break` or `continue` outside of a loop
    SEM2002     = 2002,

    /// Argument length does not match
    TYP3001     = 3001,

    /// Record used where a word is expected, or the reverse
    TYP3004     = 3004,

    /// Unknown field
    REC4000     = 4000,

    /// Fixed table limit reached
    LIM5000     = 5000,

    /// More arguments than argument registers
    LIM5001     = 5001
}
