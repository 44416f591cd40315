// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod config;
pub mod fn_ctx;
pub mod typedefs;
pub mod x86;

use runac_ast::{Expr, Function, Stmt};
use runac_errors::CodegenResult;

pub use config::*;
pub use x86::X86CodeGenerator;

/// Parent trait for generating code.
pub trait CodeGenerator {
    /// Generate code for one function, frame included.
    fn gen_function(&mut self, func: &Function) -> CodegenResult<()>;

    fn gen_stmt(&mut self, stmt: &Stmt) -> CodegenResult<()>;

    /// Generate code that leaves the value of `expr` in the return register.
    fn gen_expr(&mut self, expr: &Expr) -> CodegenResult<()>;
}
