// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

//! C ABI exported to generated code.
//!
//! Arguments always come in the order handle, index, value. A list
//! handle is a `Box<RunaList>` turned into a raw pointer by
//! `list_create`, `list_copy` or `list_merge`, and must be released
//! exactly once with `list_destroy`. Any fault is reported on stderr and
//! terminates the process with status 1.

use std::ffi::{c_char, CStr};

use crate::error::{RuntimeError, RuntimeResult};
use crate::list::{RunaList, NOT_FOUND};
use crate::{math, system};

fn or_fatal<T>(result: RuntimeResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => system::fatal(&err)
    }
}

fn list_ref<'a>(ptr: *const RunaList, op: &'static str) -> &'a RunaList {
    if ptr.is_null() {
        system::fatal(&RuntimeError::NullHandle { op });
    }
    unsafe { &*ptr }
}

fn list_mut<'a>(ptr: *mut RunaList, op: &'static str) -> &'a mut RunaList {
    if ptr.is_null() {
        system::fatal(&RuntimeError::NullHandle { op });
    }
    unsafe { &mut *ptr }
}

fn c_bytes<'a>(ptr: *const c_char) -> &'a [u8] {
    if ptr.is_null() {
        return b"(null)";
    }
    unsafe { CStr::from_ptr(ptr).to_bytes() }
}

fn into_handle(list: RunaList) -> *mut RunaList {
    Box::into_raw(Box::new(list))
}

#[no_mangle]
pub extern "C" fn list_create() -> *mut RunaList {
    into_handle(RunaList::new())
}

#[no_mangle]
pub extern "C" fn list_append(list: *mut RunaList, value: i64) {
    list_mut(list, "list_append").append(value);
}

#[no_mangle]
pub extern "C" fn list_get(list: *const RunaList, index: i64) -> i64 {
    or_fatal(list_ref(list, "list_get").get(index))
}

#[no_mangle]
pub extern "C" fn list_get_integer(list: *const RunaList, index: i64) -> i64 {
    list_get(list, index)
}

#[no_mangle]
pub extern "C" fn list_set(list: *mut RunaList, index: i64, value: i64) {
    or_fatal(list_mut(list, "list_set").set(index, value))
}

#[no_mangle]
pub extern "C" fn list_insert(list: *mut RunaList, index: i64, value: i64) {
    or_fatal(list_mut(list, "list_insert").insert(index, value))
}

#[no_mangle]
pub extern "C" fn list_remove(list: *mut RunaList, index: i64) -> i64 {
    or_fatal(list_mut(list, "list_remove").remove(index))
}

#[no_mangle]
pub extern "C" fn list_clear(list: *mut RunaList) {
    list_mut(list, "list_clear").clear();
}

#[no_mangle]
pub extern "C" fn list_find(list: *const RunaList, value: i64) -> i64 {
    match list_ref(list, "list_find").find(value) {
        Some(idx) => idx as i64,
        None => NOT_FOUND
    }
}

#[no_mangle]
pub extern "C" fn list_sort(list: *mut RunaList) {
    list_mut(list, "list_sort").sort();
}

#[no_mangle]
pub extern "C" fn list_reverse(list: *mut RunaList) {
    list_mut(list, "list_reverse").reverse();
}

#[no_mangle]
pub extern "C" fn list_copy(list: *const RunaList) -> *mut RunaList {
    into_handle(list_ref(list, "list_copy").copy())
}

#[no_mangle]
pub extern "C" fn list_merge(first: *const RunaList, second: *const RunaList) -> *mut RunaList {
    let merged = list_ref(first, "list_merge").merge(list_ref(second, "list_merge"));
    into_handle(merged)
}

#[no_mangle]
pub extern "C" fn list_length(list: *const RunaList) -> i64 {
    list_ref(list, "list_length").len() as i64
}

/// Releasing a null handle does nothing.
#[no_mangle]
pub extern "C" fn list_destroy(list: *mut RunaList) {
    if list.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(list) });
}

#[no_mangle]
pub extern "C" fn runtime_sin(degrees: i64) -> i64 {
    math::sin(degrees)
}

#[no_mangle]
pub extern "C" fn runtime_cos(degrees: i64) -> i64 {
    math::cos(degrees)
}

#[no_mangle]
pub extern "C" fn runtime_tan(degrees: i64) -> i64 {
    math::tan(degrees)
}

#[no_mangle]
pub extern "C" fn runtime_sqrt(x: i64) -> i64 {
    or_fatal(math::sqrt(x))
}

#[no_mangle]
pub extern "C" fn runtime_pow(base: i64, exponent: i64) -> i64 {
    or_fatal(math::pow(base, exponent))
}

#[no_mangle]
pub extern "C" fn runtime_abs(x: i64) -> i64 {
    or_fatal(math::abs(x))
}

#[no_mangle]
pub extern "C" fn runtime_floor(x: i64) -> i64 {
    or_fatal(math::floor(x))
}

#[no_mangle]
pub extern "C" fn runtime_ceil(x: i64) -> i64 {
    or_fatal(math::ceil(x))
}

#[no_mangle]
pub extern "C" fn runtime_min(a: i64, b: i64) -> i64 {
    math::min(a, b)
}

#[no_mangle]
pub extern "C" fn runtime_max(a: i64, b: i64) -> i64 {
    math::max(a, b)
}

#[no_mangle]
pub extern "C" fn runtime_random() -> i64 {
    math::random()
}

#[no_mangle]
pub extern "C" fn runtime_log(x: i64) -> i64 {
    or_fatal(math::log(x))
}

#[no_mangle]
pub extern "C" fn runtime_exp(x: i64) -> i64 {
    or_fatal(math::exp(x))
}

#[no_mangle]
pub extern "C" fn print_string(message: *const c_char) {
    system::print_string(c_bytes(message));
}

#[no_mangle]
pub extern "C" fn print_integer(value: i64) {
    system::print_integer(value);
}

#[no_mangle]
pub extern "C" fn print_newline() {
    system::print_newline();
}

#[no_mangle]
pub extern "C" fn runtime_panic(message: *const c_char) {
    system::runtime_panic(c_bytes(message))
}

#[no_mangle]
pub extern "C" fn runtime_assert(condition: i64, message: *const c_char) {
    system::runtime_assert(condition, c_bytes(message));
}

#[no_mangle]
pub extern "C" fn exit_with_code(code: i64) {
    system::exit_with_code(code)
}
