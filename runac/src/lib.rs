// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod compiler;

use std::path::Path;

use compiler::CompilerPipeline;
use runac_codegen::CodegenConfig;

/// Compiles the program tree stored as JSON in `file_name` into `out_file`.
pub fn compile_file(file_name: &Path, out_file: &Path) -> anyhow::Result<()> {
    let pipeline = CompilerPipeline::new(CodegenConfig::default());
    pipeline.compile(file_name, out_file)
}
