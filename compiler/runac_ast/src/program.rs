// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use serde::{Deserialize, Serialize};

use crate::Stmt;

/// A compilation unit as handed over by the parser.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    #[serde(default)]
    pub functions: Vec<Function>
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,

    /// At most six; they arrive in the System V argument registers.
    #[serde(default)]
    pub params: Vec<String>,

    pub body: Vec<Stmt>
}

/// Record type. Every field occupies one 8-byte word, in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub fields: Vec<String>
}

impl TypeDecl {
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

impl Function {
    pub fn new(name: impl Into<String>, params: &[&str], body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expr;

    #[test]
    fn test_program_decodes_from_json() {
        let json = r#"{
            "types": [{ "name": "Point", "fields": ["x", "y"] }],
            "functions": [{
                "name": "main",
                "body": [
                    { "Let": { "name": "a", "value": { "Int": 1 } } },
                    { "Print": { "Str": "hi" } },
                    { "If": { "cond": { "Ident": "a" }, "then_body": ["Break"] } },
                    { "Return": null }
                ]
            }]
        }"#;

        let program: Program = serde_json::from_str(json).unwrap();
        let main = &program.functions[0];

        assert!(main.params.is_empty());
        assert_eq!(main.body[0], Stmt::let_("a", Expr::int(1)));
        assert_eq!(main.body[1], Stmt::Print(Expr::string("hi")));
        assert_eq!(
            main.body[2],
            Stmt::If { cond: Expr::ident("a"), then_body: vec![Stmt::Break], else_body: vec![] }
        );
        assert_eq!(main.body[3], Stmt::Return(None));
        assert_eq!(program.types[0].field_index("y"), Some(1));
    }

    #[test]
    fn test_field_index_misses() {
        let decl = TypeDecl { name: "Point".into(), fields: vec!["x".into()] };
        assert_eq!(decl.field_index("x"), Some(0));
        assert_eq!(decl.field_index("z"), None);
    }
}
