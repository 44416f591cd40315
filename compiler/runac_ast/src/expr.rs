// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use serde::{Deserialize, Serialize};

use crate::{BinaryOp, CompareOp};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// 64-bit integer literal.
    Int(i64),

    /// String literal. Evaluates to the address of its read-only copy.
    Str(String),

    /// Reference to a local variable or parameter.
    Ident(String),

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>
    },

    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>
    },

    /// Call to a function of the program or of the runtime library.
    Call {
        name: String,
        args: Vec<Expr>
    },

    /// Reads a field of a record variable.
    Field {
        name: String,
        field: String
    }
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs)
        }
    }

    pub fn compare(op: CompareOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs)
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            name: name.into(),
            args
        }
    }

    pub fn field(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field {
            name: name.into(),
            field: field.into()
        }
    }
}
