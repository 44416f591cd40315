// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use runac_ast::Program;
use runac_codegen::{CodegenConfig, X86CodeGenerator};
use runac_errors::CodegenResult;

#[derive(Debug, Clone)]
pub struct CompilerPipeline {
    config: CodegenConfig
}

impl CompilerPipeline {
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Reads a program tree produced by the parser.
    pub fn load_program(&self, path: &Path) -> anyhow::Result<Program> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("cannot read program tree `{}`", path.display()))?;
        let program = serde_json::from_str(&source)
            .with_context(|| format!("`{}` is not a valid program tree", path.display()))?;
        Ok(program)
    }

    /// Generates assembly for `program` into any sink.
    pub fn compile_program<W: Write>(&self, program: &Program, out: W) -> CodegenResult<W> {
        let mut cg = X86CodeGenerator::from_writer(out, self.config);
        cg.generate(program)?;
        cg.finish()
    }

    /// Compiles `input` into the assembly file `output`. A failed unit
    /// leaves no output file behind.
    pub fn compile(&self, input: &Path, output: &Path) -> anyhow::Result<()> {
        let program = self.load_program(input)?;
        log::info!(
            "compiling {} ({} function(s), {} record type(s))",
            input.display(),
            program.functions.len(),
            program.types.len()
        );

        let result = X86CodeGenerator::create(output, self.config)
            .and_then(|mut cg| {
                cg.generate(&program)?;
                cg.finish()
            });

        if let Err(err) = result {
            if output.exists() {
                let _ = fs::remove_file(output);
            }
            return Err(err.into());
        }
        log::info!("wrote {}", output.display());
        Ok(())
    }
}
