#[cfg(test)]
mod tests_pipeline {
    use std::fs;
    use std::path::PathBuf;

    use runac::compiler::CompilerPipeline;
    use runac_ast::{Expr, Function, Program, Stmt};
    use runac_codegen::CodegenConfig;
    use runac_errors::CodegenErr;

    fn temp_path(tag: &str, ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("runac-{tag}-{}.{ext}", std::process::id()))
    }

    const HELLO: &str = r#"{
        "functions": [{
            "name": "main",
            "body": [
                { "Let": { "name": "greeting", "value": { "Str": "hello" } } },
                { "Print": { "Str": "hello" } },
                { "Return": { "Int": 0 } }
            ]
        }]
    }"#;

    #[test]
    fn test_compile_json_program_to_file() {
        let input = temp_path("hello", "json");
        let output = temp_path("hello", "s");
        fs::write(&input, HELLO).unwrap();

        runac::compile_file(&input, &output).unwrap();
        let asm = fs::read_to_string(&output).unwrap();
        fs::remove_file(&input).unwrap();
        fs::remove_file(&output).unwrap();

        assert!(asm.contains("main:"));
        assert_eq!(asm.matches(".string \"hello\"").count(), 1);
        assert!(asm.contains("call print_string@PLT"));
    }

    #[test]
    fn test_invalid_tree_is_reported_with_context() {
        let input = temp_path("broken", "json");
        let output = temp_path("broken", "s");
        fs::write(&input, "{ \"functions\": 3 }").unwrap();

        let err = runac::compile_file(&input, &output).unwrap_err();
        fs::remove_file(&input).unwrap();

        assert!(err.to_string().contains("not a valid program tree"));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input() {
        let err = runac::compile_file(&temp_path("absent", "json"), &temp_path("absent", "s")).unwrap_err();
        assert!(err.to_string().contains("cannot read program tree"));
    }

    #[test]
    fn test_failed_unit_leaves_no_output() {
        let input = temp_path("undefined", "json");
        let output = temp_path("undefined", "s");
        fs::write(&input, r#"{ "functions": [{ "name": "main", "body": [{ "Print": { "Ident": "nope" } }] }] }"#).unwrap();

        let err = CompilerPipeline::new(CodegenConfig::default()).compile(&input, &output).unwrap_err();
        fs::remove_file(&input).unwrap();

        assert!(matches!(err.downcast_ref::<CodegenErr>(), Some(CodegenErr::UndefinedVariable { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_compile_program_into_memory() {
        let program = Program {
            types: vec![],
            functions: vec![Function::new("main", &[], vec![Stmt::Print(Expr::int(42))])]
        };
        let pipeline = CompilerPipeline::new(CodegenConfig::default());
        let asm = String::from_utf8(pipeline.compile_program(&program, Vec::new()).unwrap()).unwrap();

        assert!(asm.contains("movq $42, %rax\n    movq %rax, %rdi\n    call print_integer@PLT"));
    }
}

#[cfg(test)]
mod tests_demos {
    use std::path::Path;

    use runac::compiler::CompilerPipeline;
    use runac_codegen::CodegenConfig;

    #[test]
    fn test_counter_demo_compiles() {
        let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/counter.json");
        let pipeline = CompilerPipeline::new(CodegenConfig::default());
        let program = pipeline.load_program(&demo).unwrap();
        let asm = String::from_utf8(pipeline.compile_program(&program, Vec::new()).unwrap()).unwrap();

        assert!(asm.contains("square:"));
        assert!(asm.contains("call square\n"));
        assert!(asm.contains("call runtime_sqrt@PLT"));
        assert_eq!(asm.matches(".string").count(), 1);
    }
}
