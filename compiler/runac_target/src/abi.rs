// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

//! Functions exported by the Runa runtime library.
//!
//! Generated code calls these through the PLT. Argument order is
//! always handle, index, value.

use indexmap::IndexMap;
use itertools::Itertools;
use lazy_static::lazy_static;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeGroup {
    List,
    Math,
    System
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeFn {
    pub name: &'static str,
    pub arity: usize,
    pub group: RuntimeGroup
}

const fn runtime_fn(name: &'static str, arity: usize, group: RuntimeGroup) -> RuntimeFn {
    RuntimeFn { name, arity, group }
}

const RUNTIME_TABLE: [RuntimeFn; 34] = [
    runtime_fn("list_create", 0, RuntimeGroup::List),
    runtime_fn("list_append", 2, RuntimeGroup::List),
    runtime_fn("list_get", 2, RuntimeGroup::List),
    runtime_fn("list_get_integer", 2, RuntimeGroup::List),
    runtime_fn("list_set", 3, RuntimeGroup::List),
    runtime_fn("list_insert", 3, RuntimeGroup::List),
    runtime_fn("list_remove", 2, RuntimeGroup::List),
    runtime_fn("list_clear", 1, RuntimeGroup::List),
    runtime_fn("list_find", 2, RuntimeGroup::List),
    runtime_fn("list_sort", 1, RuntimeGroup::List),
    runtime_fn("list_reverse", 1, RuntimeGroup::List),
    runtime_fn("list_copy", 1, RuntimeGroup::List),
    runtime_fn("list_merge", 2, RuntimeGroup::List),
    runtime_fn("list_length", 1, RuntimeGroup::List),
    runtime_fn("list_destroy", 1, RuntimeGroup::List),
    runtime_fn("runtime_sin", 1, RuntimeGroup::Math),
    runtime_fn("runtime_cos", 1, RuntimeGroup::Math),
    runtime_fn("runtime_tan", 1, RuntimeGroup::Math),
    runtime_fn("runtime_sqrt", 1, RuntimeGroup::Math),
    runtime_fn("runtime_pow", 2, RuntimeGroup::Math),
    runtime_fn("runtime_abs", 1, RuntimeGroup::Math),
    runtime_fn("runtime_floor", 1, RuntimeGroup::Math),
    runtime_fn("runtime_ceil", 1, RuntimeGroup::Math),
    runtime_fn("runtime_min", 2, RuntimeGroup::Math),
    runtime_fn("runtime_max", 2, RuntimeGroup::Math),
    runtime_fn("runtime_random", 0, RuntimeGroup::Math),
    runtime_fn("runtime_log", 1, RuntimeGroup::Math),
    runtime_fn("runtime_exp", 1, RuntimeGroup::Math),
    runtime_fn("print_string", 1, RuntimeGroup::System),
    runtime_fn("print_integer", 1, RuntimeGroup::System),
    runtime_fn("print_newline", 0, RuntimeGroup::System),
    runtime_fn("runtime_panic", 1, RuntimeGroup::System),
    runtime_fn("runtime_assert", 2, RuntimeGroup::System),
    runtime_fn("exit_with_code", 1, RuntimeGroup::System),
];

lazy_static! {
    pub static ref RUNTIME_FUNCTIONS: IndexMap<&'static str, RuntimeFn> = RUNTIME_TABLE
        .iter()
        .map(|f| (f.name, *f))
        .collect();
}

pub fn lookup(name: &str) -> Option<&'static RuntimeFn> {
    RUNTIME_FUNCTIONS.get(name)
}

/// One line per function, grouped and sorted by name.
pub fn listing() -> String {
    RUNTIME_FUNCTIONS
        .values()
        .sorted_by_key(|f| (f.group, f.name))
        .map(|f| format!("{:<7} {}/{}", format!("{:?}", f.group).to_lowercase(), f.name, f.arity))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("list_set").map(|f| f.arity), Some(3));
        assert_eq!(lookup("runtime_random").map(|f| f.arity), Some(0));
        assert!(lookup("printf").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        assert_eq!(RUNTIME_FUNCTIONS.len(), RUNTIME_TABLE.len());
    }

    #[test]
    fn test_listing_is_grouped() {
        let listing = listing();
        let first = listing.lines().next().unwrap();
        assert_eq!(first.trim_end(), "list    list_append/2");
        assert!(listing.lines().last().unwrap().starts_with("system"));
    }
}
