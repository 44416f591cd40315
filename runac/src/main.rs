// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use runac::compiler::CompilerPipeline;
use runac_codegen::config::{CodegenConfigBuilder, DEFAULT_MAX_STRINGS, DEFAULT_MAX_VARIABLES};
use runac_errors::CodegenErr;

#[derive(Parser, Debug)]
#[command(name = "runac")]
#[command(about = "Runa bootstrap compiler: program tree to x86-64 assembly", long_about = None)]
struct Cli {
    /// Program tree as JSON
    #[arg(value_name = "INPUT", required_unless_present = "list_abi")]
    input: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE", default_value = "out.s")]
    out: PathBuf,

    /// Locals and parameters allowed per function
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_VARIABLES)]
    max_variables: usize,

    /// Distinct string literals allowed per unit
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_STRINGS)]
    max_strings: usize,

    /// Print the runtime functions generated code may call, then exit
    #[arg(long)]
    list_abi: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_abi {
        println!("{}", runac_target::abi::listing());
        return Ok(());
    }

    let config = CodegenConfigBuilder::new()
        .max_variables(cli.max_variables)
        .max_strings(cli.max_strings)
        .build();
    let pipeline = CompilerPipeline::new(config);

    let Some(input) = cli.input else {
        return Ok(());
    };
    if let Err(err) = pipeline.compile(&input, &cli.out) {
        if let Some(codegen_err) = err.downcast_ref::<CodegenErr>() {
            codegen_err.dump();
        }
        return Err(err);
    }
    Ok(())
}
