// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt::Write;

use indexmap::IndexSet;
use runac_errors::{CodegenErr, CodegenResult};

/// Pool index is used to index items in the string pool.
pub type PoolIdx = usize;

/// Label prefix of every interned string.
pub const STR_LABEL_PREFIX: &str = ".STR";

/// String literals of one compilation unit.
///
/// Literals are interned by exact content: the first occurrence gets the
/// next index and every later occurrence reuses it. Indices follow first
/// occurrence order, which keeps labels stable across runs.
#[derive(Debug)]
pub struct StringPool {
    entries: IndexSet<String>,
    capacity: usize
}

impl StringPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexSet::new(),
            capacity
        }
    }

    pub fn insert(&mut self, value: &str) -> CodegenResult<PoolIdx> {
        if let Some(idx) = self.entries.get_index_of(value) {
            return Ok(idx);
        }
        if self.entries.len() >= self.capacity {
            return Err(CodegenErr::TooManyStrings { limit: self.capacity });
        }
        let (idx, _) = self.entries.insert_full(value.to_string());
        log::trace!("interned string literal {idx} ({} bytes)", value.len());
        Ok(idx)
    }

    pub fn label(idx: PoolIdx) -> String {
        format!("{STR_LABEL_PREFIX}{idx}")
    }

    pub fn get(&self, index: PoolIdx) -> Option<&str> {
        self.entries.get_index(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter_enumerated(&self) -> impl Iterator<Item = (PoolIdx, &str)> {
        self.entries.iter().map(String::as_str).enumerate()
    }

    /// Read-only data section holding every literal once, or nothing
    /// when the pool is empty.
    pub fn dump_rodata(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut output = String::from(".section .rodata\n");
        for (index, value) in self.iter_enumerated() {
            let _ = writeln!(output, "{}:\n    .string \"{}\"", Self::label(index), escape_gas(value));
        }
        output
    }
}

/// Escapes a literal for a GAS `.string` directive.
pub fn escape_gas(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'\\' => escaped.push_str("\\\\"),
            b'"' => escaped.push_str("\\\""),
            b'\n' => escaped.push_str("\\n"),
            b'\t' => escaped.push_str("\\t"),
            b'\r' => escaped.push_str("\\r"),
            0x20..=0x7e => escaped.push(byte as char),
            _ => {
                let _ = write!(escaped, "\\{byte:03o}");
            }
        }
    }
    escaped
}
