// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Faults raised by the runtime library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    IndexOutOfRange {
        index: i64,
        length: usize
    },

    /// A list operation received a null handle.
    NullHandle {
        op: &'static str
    },

    /// The argument lies outside the function's mathematical domain.
    DomainError {
        op: &'static str,
        value: i64
    },

    /// The result cannot be represented as a 64-bit fixed-point value.
    Overflow {
        op: &'static str
    }
}

impl RuntimeError {
    /// Stable code for each fault class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "R0001",
            Self::NullHandle { .. } => "R0002",
            Self::DomainError { .. } => "R0003",
            Self::Overflow { .. } => "R0004"
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, length } => {
                write!(f, "List index out of bounds: {index} (list length: {length})")
            },
            Self::NullHandle { op } => {
                write!(f, "`{op}` called with a null list handle")
            },
            Self::DomainError { op, value } => {
                write!(f, "`{op}` is undefined for argument {value}")
            },
            Self::Overflow { op } => {
                write!(f, "`{op}` overflowed the fixed-point range")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
