// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use serde::{Deserialize, Serialize};

use crate::Expr;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Declares a word-sized local.
    Let {
        name: String,
        value: Expr
    },

    /// Declares a zero-initialised local of a record type.
    LetRecord {
        name: String,
        type_name: String
    },

    Set {
        name: String,
        value: Expr
    },

    SetField {
        name: String,
        field: String,
        value: Expr
    },

    Return(Option<Expr>),

    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        #[serde(default)]
        else_body: Vec<Stmt>
    },

    While {
        cond: Expr,
        body: Vec<Stmt>
    },

    /// Prints the value followed by a newline.
    Print(Expr),

    /// Evaluates an expression for its side effects.
    Expr(Expr),

    Break,
    Continue
}

impl Stmt {
    pub fn let_(name: impl Into<String>, value: Expr) -> Self {
        Self::Let {
            name: name.into(),
            value
        }
    }

    pub fn set(name: impl Into<String>, value: Expr) -> Self {
        Self::Set {
            name: name.into(),
            value
        }
    }
}
