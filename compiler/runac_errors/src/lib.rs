// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod code;

use std::fmt;
use std::io::{self, Write};

use runa_runtime::system;

pub use code::ErrCode;

pub type CodegenResult<T> = Result<T, CodegenErr>;

/// Fatal code generation errors. None of them is recoverable; the
/// compilation unit is abandoned.
#[derive(Debug)]
pub enum CodegenErr {
    Io(io::Error),

    UndefinedVariable {
        name: String,
        function: String
    },

    UndefinedFunction {
        name: String
    },

    UndefinedType {
        type_name: String
    },

    UnknownField {
        field: String,
        type_name: String
    },

    NotARecord {
        name: String
    },

    /// Whole-value assignment to a record variable.
    NotAScalar {
        name: String
    },

    VariableAlreadyDefined {
        name: String,
        function: String
    },

    DuplicateFunction {
        name: String
    },

    DuplicateType {
        type_name: String
    },

    ArgCountMismatch {
        function: String,
        expected: usize,
        found: usize
    },

    TooManyArguments {
        function: String,
        limit: usize,
        found: usize
    },

    TooManyVariables {
        function: String,
        limit: usize
    },

    TooManyStrings {
        limit: usize
    },

    BreakOutsideLoop {
        function: String
    },

    ContinueOutsideLoop {
        function: String
    }
}

impl CodegenErr {
    pub fn code(&self) -> ErrCode {
        match self {
            Self::Io(_) => ErrCode::IO0001,
            Self::UndefinedVariable { .. }
            | Self::UndefinedFunction { .. }
            | Self::UndefinedType { .. } => ErrCode::SEM2000,
            Self::VariableAlreadyDefined { .. }
            | Self::DuplicateFunction { .. }
            | Self::DuplicateType { .. } => ErrCode::SEM2001,
            Self::BreakOutsideLoop { .. } | Self::ContinueOutsideLoop { .. } => ErrCode::SEM2002,
            Self::ArgCountMismatch { .. } => ErrCode::TYP3001,
            Self::NotARecord { .. } | Self::NotAScalar { .. } => ErrCode::TYP3004,
            Self::UnknownField { .. } => ErrCode::REC4000,
            Self::TooManyVariables { .. } | Self::TooManyStrings { .. } => ErrCode::LIM5000,
            Self::TooManyArguments { .. } => ErrCode::LIM5001
        }
    }

    /// Writes `error[<code>]: <message>` followed by a newline.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        system::write_string(out, "error[")?;
        system::write_integer(out, self.code() as i64)?;
        system::write_string(out, "]: ")?;
        write!(out, "{self}")?;
        system::write_string(out, "\n")
    }

    /// Reports the error on stderr without allocating and exits with
    /// status 1.
    pub fn dump(&self) -> ! {
        let _ = self.write_report(&mut io::stderr().lock());
        std::process::exit(1)
    }
}

impl fmt::Display for CodegenErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Cannot write assembly output: {err}"),
            Self::UndefinedVariable { name, function } => {
                write!(f, "Undefined variable `{name}` in function `{function}`.")
            },
            Self::UndefinedFunction { name } => write!(f, "Undefined function `{name}`."),
            Self::UndefinedType { type_name } => write!(f, "Undefined record type `{type_name}`."),
            Self::UnknownField { field, type_name } => {
                write!(f, "Record `{type_name}` has no field named `{field}`.")
            },
            Self::NotARecord { name } => write!(f, "`{name}` is not a record."),
            Self::NotAScalar { name } => {
                write!(f, "Record `{name}` cannot be assigned as a whole; assign its fields.")
            },
            Self::VariableAlreadyDefined { name, function } => {
                write!(f, "Variable `{name}` is already defined in function `{function}`.")
            },
            Self::DuplicateFunction { name } => write!(f, "Function `{name}` is defined more than once."),
            Self::DuplicateType { type_name } => {
                write!(f, "Record type `{type_name}` is defined more than once.")
            },
            Self::ArgCountMismatch { function, expected, found } => {
                write!(f, "Function `{function}` expects {expected} argument(s), found {found}.")
            },
            Self::TooManyArguments { function, limit, found } => {
                write!(f, "`{function}` uses {found} arguments; at most {limit} are supported.")
            },
            Self::TooManyVariables { function, limit } => {
                write!(f, "Too many variables in function `{function}` (limit: {limit}).")
            },
            Self::TooManyStrings { limit } => write!(f, "Too many string literals (limit: {limit})."),
            Self::BreakOutsideLoop { function } => {
                write!(f, "Break statement outside of loop in function `{function}`.")
            },
            Self::ContinueOutsideLoop { function } => {
                write!(f, "Continue statement outside of loop in function `{function}`.")
            }
        }
    }
}

impl std::error::Error for CodegenErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None
        }
    }
}

impl From<io::Error> for CodegenErr {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
