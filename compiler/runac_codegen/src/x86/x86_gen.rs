// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use itertools::Itertools;
use runac_ast::{BinaryOp, CompareOp, Expr, Function, Program, Stmt, TypeDecl};
use runac_const::pool::StringPool;
use runac_errors::{CodegenErr, CodegenResult};
use runac_target::abi;
use runac_target::align_to_16;
use runac_target::asm::x86::{X86RegName, ARG_REGISTERS, RETURN_REGISTER, SCRATCH_REGISTER};
use runac_target::WORD_SIZE;

use crate::fn_ctx::{FnCtx, LoopLabels, VarKind, Variable};
use crate::typedefs::*;
use crate::{CodeGenerator, CodegenConfig};

const RAX: X86RegName = RETURN_REGISTER;
const RCX: X86RegName = SCRATCH_REGISTER;

/// Emits x86-64 AT&T assembly for one compilation unit.
///
/// Expressions use a stack discipline: every expression leaves its value
/// in `%rax`, binary operators push the left operand while the right one
/// is evaluated and pop it back afterwards. Locals live in 8-byte slots
/// below `%rbp`.
///
/// The string pool and the label counter span the whole unit; variables,
/// slots and the loop stack are reset for every function.
pub struct X86CodeGenerator<W: Write> {
    out: W,

    config: CodegenConfig,

    strings: StringPool,

    next_label: LabelId,

    /// Name and parameter count of every function in the unit.
    functions: IndexMap<String, usize>,

    /// Record types by name.
    types: IndexMap<String, TypeDecl>,

    fn_ctx: FnCtx,

    /// Body of the function being generated. Written out once its frame
    /// size is known.
    code: String
}

impl X86CodeGenerator<BufWriter<File>> {
    /// Opens `path` for writing. This is the only failure before traversal.
    pub fn create<P: AsRef<Path>>(path: P, config: CodegenConfig) -> CodegenResult<Self> {
        let file = File::create(path.as_ref())?;
        log::debug!("writing assembly to {}", path.as_ref().display());
        Ok(Self::from_writer(BufWriter::new(file), config))
    }
}

impl<W: Write> X86CodeGenerator<W> {
    pub fn from_writer(out: W, config: CodegenConfig) -> Self {
        Self {
            out,
            config,
            strings: StringPool::new(config.max_strings),
            next_label: 0,
            functions: IndexMap::new(),
            types: IndexMap::new(),
            fn_ctx: FnCtx::new("", config.max_variables, 0),
            code: String::new()
        }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    /// Generates the whole unit: every function, then the read-only data
    /// section with each distinct string literal once.
    pub fn generate(&mut self, program: &Program) -> CodegenResult<()> {
        self.collect_declarations(program)?;

        self.out.write_all(b".text\n")?;
        for func in &program.functions {
            self.gen_function(func)?;
        }

        let rodata = self.strings.dump_rodata();
        if !rodata.is_empty() {
            self.out.write_all(b"\n")?;
            self.out.write_all(rodata.as_bytes())?;
        }
        self.out.write_all(b"\n.section .note.GNU-stack,\"\",@progbits\n")?;
        log::debug!(
            "generated {} function(s), {} string literal(s), {} label(s)",
            program.functions.len(),
            self.strings.len(),
            self.next_label
        );
        Ok(())
    }

    /// Flushes and hands back the sink.
    pub fn finish(mut self) -> CodegenResult<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn collect_declarations(&mut self, program: &Program) -> CodegenResult<()> {
        for decl in &program.types {
            if self.types.insert(decl.name.clone(), decl.clone()).is_some() {
                return Err(CodegenErr::DuplicateType { type_name: decl.name.clone() });
            }
        }
        for func in &program.functions {
            if self.functions.insert(func.name.clone(), func.params.len()).is_some() {
                return Err(CodegenErr::DuplicateFunction { name: func.name.clone() });
            }
        }
        Ok(())
    }

    fn get_next_label(&mut self) -> LabelId {
        let current = self.next_label;
        self.next_label += 1;
        current
    }

    fn emit(&mut self, instr: &str) {
        self.code.push_str("    ");
        self.code.push_str(instr);
        self.code.push('\n');
    }

    fn emit_label(&mut self, label: LabelId) {
        self.code.push_str(&format!(".L{label}:\n"));
    }

    fn emit_push(&mut self, reg: X86RegName) {
        self.emit(&format!("pushq {reg}"));
        self.fn_ctx.push_depth += 1;
    }

    fn emit_pop(&mut self, reg: X86RegName) {
        self.emit(&format!("popq {reg}"));
        self.fn_ctx.push_depth -= 1;
    }

    fn emit_load_imm(&mut self, value: i64) {
        if i32::try_from(value).is_ok() {
            self.emit(&format!("movq ${value}, {RAX}"));
        }
        else {
            self.emit(&format!("movabsq ${value}, {RAX}"));
        }
    }

    /// Keeps `%rsp` 16-byte aligned at the call while values are pending.
    fn emit_call(&mut self, target: &str) {
        let misaligned = self.fn_ctx.push_depth % 2 == 1;
        if misaligned {
            self.emit("subq $8, %rsp");
        }
        self.emit(&format!("call {target}"));
        if misaligned {
            self.emit("addq $8, %rsp");
        }
    }

    fn slot(offset: StackOffset) -> String {
        format!("-{offset}(%rbp)")
    }

    fn record_field(&self, name: &str, field: &str) -> CodegenResult<StackOffset> {
        let var = self.fn_ctx.lookup(name)?;
        match &var.kind {
            VarKind::Record { type_name, .. } => {
                let index = self.types
                    .get(type_name)
                    .and_then(|decl| decl.field_index(field))
                    .ok_or_else(|| CodegenErr::UnknownField {
                        field: field.to_string(),
                        type_name: type_name.clone()
                    })?;
                Ok(var.offset - index * WORD_SIZE)
            },
            VarKind::Scalar | VarKind::Str => Err(CodegenErr::NotARecord { name: name.to_string() })
        }
    }

    fn scalar(&self, name: &str) -> CodegenResult<&Variable> {
        let var = self.fn_ctx.lookup(name)?;
        match var.kind {
            VarKind::Scalar | VarKind::Str => Ok(var),
            VarKind::Record { .. } => Err(CodegenErr::NotAScalar { name: name.to_string() })
        }
    }

    fn check_arg_count(&self, name: &str, found: usize) -> CodegenResult<()> {
        if found > ARG_REGISTERS.len() {
            return Err(CodegenErr::TooManyArguments {
                function: name.to_string(),
                limit: ARG_REGISTERS.len(),
                found
            });
        }
        Ok(())
    }

    /// Calls into the program itself go straight to the symbol; calls into
    /// the runtime library go through the PLT.
    fn resolve_callee(&self, name: &str, found: usize) -> CodegenResult<String> {
        let (expected, target) = if let Some(&arity) = self.functions.get(name) {
            (arity, name.to_string())
        }
        else if let Some(runtime_fn) = abi::lookup(name) {
            (runtime_fn.arity, format!("{name}@PLT"))
        }
        else {
            return Err(CodegenErr::UndefinedFunction { name: name.to_string() });
        };

        if expected != found {
            return Err(CodegenErr::ArgCountMismatch {
                function: name.to_string(),
                expected,
                found
            });
        }
        Ok(target)
    }

    fn gen_call(&mut self, name: &str, args: &[Expr]) -> CodegenResult<()> {
        self.check_arg_count(name, args.len())?;
        let target = self.resolve_callee(name, args.len())?;

        for arg in args {
            self.gen_expr(arg)?;
            self.emit_push(RAX);
        }
        for reg in ARG_REGISTERS[..args.len()].iter().rev() {
            self.emit_pop(*reg);
        }
        self.emit_call(&target);
        Ok(())
    }

    /// Leaves the left operand in `%rax` and the right one in `%rcx`.
    fn gen_operands(&mut self, lhs: &Expr, rhs: &Expr) -> CodegenResult<()> {
        self.gen_expr(lhs)?;
        self.emit_push(RAX);
        self.gen_expr(rhs)?;
        self.emit(&format!("movq {RAX}, {RCX}"));
        self.emit_pop(RAX);
        Ok(())
    }

    fn gen_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> CodegenResult<()> {
        self.gen_operands(lhs, rhs)?;
        match op {
            BinaryOp::Add => self.emit(&format!("addq {RCX}, {RAX}")),
            BinaryOp::Sub => self.emit(&format!("subq {RCX}, {RAX}")),
            BinaryOp::Mul => self.emit(&format!("imulq {RCX}, {RAX}")),
            BinaryOp::Div | BinaryOp::Mod => self.gen_division(op == BinaryOp::Mod)
        }
        Ok(())
    }

    /// Division or remainder by zero yields 0.
    fn gen_division(&mut self, remainder: bool) {
        let nonzero = self.get_next_label();
        let done = self.get_next_label();

        self.emit(&format!("testq {RCX}, {RCX}"));
        self.emit(&format!("jne .L{nonzero}"));
        self.emit(&format!("movq $0, {RAX}"));
        self.emit(&format!("jmp .L{done}"));
        self.emit_label(nonzero);
        self.emit("cqto");
        self.emit(&format!("idivq {RCX}"));
        if remainder {
            self.emit(&format!("movq %rdx, {RAX}"));
        }
        self.emit_label(done);
    }

    fn gen_compare(&mut self, op: CompareOp, lhs: &Expr, rhs: &Expr) -> CodegenResult<()> {
        self.gen_operands(lhs, rhs)?;
        let suffix = condition_suffix(op);
        self.emit(&format!("cmpq {RCX}, {RAX}"));
        self.emit(&format!("set{suffix} %{}", RAX.byte_name()));
        self.emit(&format!("movzbq %{}, {RAX}", RAX.byte_name()));
        Ok(())
    }

    fn gen_block(&mut self, stmts: &[Stmt]) -> CodegenResult<()> {
        for stmt in stmts {
            self.gen_stmt(stmt)?;
        }
        Ok(())
    }

    fn gen_if(&mut self, cond: &Expr, then_body: &[Stmt], else_body: &[Stmt]) -> CodegenResult<()> {
        self.gen_expr(cond)?;
        self.emit(&format!("cmpq $0, {RAX}"));

        if else_body.is_empty() {
            let end = self.get_next_label();
            self.emit(&format!("je .L{end}"));
            self.gen_block(then_body)?;
            self.emit_label(end);
            return Ok(());
        }

        let otherwise = self.get_next_label();
        let end = self.get_next_label();
        self.emit(&format!("je .L{otherwise}"));
        self.gen_block(then_body)?;
        self.emit(&format!("jmp .L{end}"));
        self.emit_label(otherwise);
        self.gen_block(else_body)?;
        self.emit_label(end);
        Ok(())
    }

    fn gen_while(&mut self, cond: &Expr, body: &[Stmt]) -> CodegenResult<()> {
        let labels = LoopLabels {
            start: self.get_next_label(),
            end: self.get_next_label()
        };

        self.emit_label(labels.start);
        self.gen_expr(cond)?;
        self.emit(&format!("cmpq $0, {RAX}"));
        self.emit(&format!("je .L{}", labels.end));

        self.fn_ctx.enter_loop(labels);
        let body_res = self.gen_block(body);
        self.fn_ctx.exit_loop();
        body_res?;

        self.emit(&format!("jmp .L{}", labels.start));
        self.emit_label(labels.end);
        Ok(())
    }

    /// String literals and variables bound to one print as text.
    fn is_string_value(&self, value: &Expr) -> bool {
        match value {
            Expr::Str(_) => true,
            Expr::Ident(name) => self.fn_ctx
                .lookup(name)
                .is_ok_and(|var| var.kind == VarKind::Str),
            _ => false
        }
    }

    fn gen_print(&mut self, value: &Expr) -> CodegenResult<()> {
        self.gen_expr(value)?;
        self.emit(&format!("movq {RAX}, {}", ARG_REGISTERS[0]));
        if self.is_string_value(value) {
            self.emit_call("print_string@PLT");
        }
        else {
            self.emit_call("print_integer@PLT");
        }
        self.emit_call("print_newline@PLT");
        Ok(())
    }

    fn emit_function_preamble(&mut self, name: &str) -> CodegenResult<()> {
        let stack_size = align_to_16(self.fn_ctx.frame_size());
        let mut output = format!("\n.globl {name}\n.type {name}, @function\n{name}:\n");
        output.push_str("    pushq %rbp\n    movq %rsp, %rbp\n");
        if stack_size > 0 {
            output.push_str(&format!("    subq ${stack_size}, %rsp\n"));
        }
        self.out.write_all(output.as_bytes())?;
        Ok(())
    }

    fn emit_function_postamble(&mut self) {
        let exit = self.fn_ctx.exit_label;
        self.emit_label(exit);
        self.emit("movq %rbp, %rsp");
        self.emit("popq %rbp");
        self.emit("ret");
    }
}

impl<W: Write> CodeGenerator for X86CodeGenerator<W> {
    fn gen_function(&mut self, func: &Function) -> CodegenResult<()> {
        log::debug!("generating function `{}`", func.name);
        self.check_arg_count(&func.name, func.params.len())?;

        let exit_label = self.get_next_label();
        self.fn_ctx = FnCtx::new(&func.name, self.config.max_variables, exit_label);
        self.code.clear();

        for (param, reg) in func.params.iter().zip(ARG_REGISTERS) {
            let offset = self.fn_ctx.declare(param, VarKind::Scalar)?;
            self.emit(&format!("movq {reg}, {}", Self::slot(offset)));
        }

        self.gen_block(&func.body)?;

        // falling off the end returns 0
        self.emit(&format!("movq $0, {RAX}"));
        self.emit_function_postamble();

        self.emit_function_preamble(&func.name)?;
        let body = std::mem::take(&mut self.code);
        self.out.write_all(body.as_bytes())?;

        log::trace!(
            "`{}` frame: {}",
            func.name,
            self.fn_ctx.variables().map(|(name, var)| format!("{name}@-{}", var.offset)).join(", ")
        );
        Ok(())
    }

    fn gen_stmt(&mut self, stmt: &Stmt) -> CodegenResult<()> {
        match stmt {
            Stmt::Let { name, value } => {
                self.gen_expr(value)?;
                let kind = if self.is_string_value(value) { VarKind::Str } else { VarKind::Scalar };
                let offset = self.fn_ctx.declare(name, kind)?;
                self.emit(&format!("movq {RAX}, {}", Self::slot(offset)));
            },
            Stmt::LetRecord { name, type_name } => {
                let field_count = self.types
                    .get(type_name)
                    .map(|decl| decl.fields.len())
                    .ok_or_else(|| CodegenErr::UndefinedType { type_name: type_name.clone() })?;
                let slots = field_count.max(1);
                let base = self.fn_ctx.declare(name, VarKind::Record { type_name: type_name.clone(), slots })?;
                for index in 0..slots {
                    self.emit(&format!("movq $0, {}", Self::slot(base - index * WORD_SIZE)));
                }
            },
            Stmt::Set { name, value } => {
                self.gen_expr(value)?;
                let offset = self.scalar(name)?.offset;
                self.emit(&format!("movq {RAX}, {}", Self::slot(offset)));
            },
            Stmt::SetField { name, field, value } => {
                self.gen_expr(value)?;
                let offset = self.record_field(name, field)?;
                self.emit(&format!("movq {RAX}, {}", Self::slot(offset)));
            },
            Stmt::Return(value) => {
                match value {
                    Some(expr) => self.gen_expr(expr)?,
                    None => self.emit(&format!("movq $0, {RAX}"))
                }
                let exit = self.fn_ctx.exit_label;
                self.emit(&format!("jmp .L{exit}"));
            },
            Stmt::If { cond, then_body, else_body } => self.gen_if(cond, then_body, else_body)?,
            Stmt::While { cond, body } => self.gen_while(cond, body)?,
            Stmt::Print(value) => self.gen_print(value)?,
            Stmt::Expr(expr) => self.gen_expr(expr)?,
            Stmt::Break => {
                let labels = self.fn_ctx
                    .innermost_loop()
                    .ok_or_else(|| CodegenErr::BreakOutsideLoop { function: self.fn_ctx.name.clone() })?;
                self.emit(&format!("jmp .L{}", labels.end));
            },
            Stmt::Continue => {
                let labels = self.fn_ctx
                    .innermost_loop()
                    .ok_or_else(|| CodegenErr::ContinueOutsideLoop { function: self.fn_ctx.name.clone() })?;
                self.emit(&format!("jmp .L{}", labels.start));
            }
        }
        Ok(())
    }

    fn gen_expr(&mut self, expr: &Expr) -> CodegenResult<()> {
        match expr {
            Expr::Int(value) => self.emit_load_imm(*value),
            Expr::Str(value) => {
                let idx = self.strings.insert(value)?;
                self.emit(&format!("leaq {}(%rip), {RAX}", StringPool::label(idx)));
            },
            Expr::Ident(name) => {
                let var = self.fn_ctx.lookup(name)?;
                let addr = Self::slot(var.offset);
                // a record evaluates to its base address
                let instr = match var.kind {
                    VarKind::Scalar | VarKind::Str => "movq",
                    VarKind::Record { .. } => "leaq"
                };
                self.emit(&format!("{instr} {addr}, {RAX}"));
            },
            Expr::Binary { op, lhs, rhs } => self.gen_binary(*op, lhs, rhs)?,
            Expr::Compare { op, lhs, rhs } => self.gen_compare(*op, lhs, rhs)?,
            Expr::Call { name, args } => self.gen_call(name, args)?,
            Expr::Field { name, field } => {
                let offset = self.record_field(name, field)?;
                self.emit(&format!("movq {}, {RAX}", Self::slot(offset)));
            }
        }
        Ok(())
    }
}

/// `setcc` suffix for a signed comparison.
fn condition_suffix(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "e",
        CompareOp::NotEq => "ne",
        CompareOp::Lt => "l",
        CompareOp::LtEq => "le",
        CompareOp::Gt => "g",
        CompareOp::GtEq => "ge"
    }
}
