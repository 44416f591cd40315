// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

//! Diagnostic print path.
//!
//! Nothing here allocates on the heap: integers are formatted into a
//! fixed stack buffer and bytes go straight to the unbuffered standard
//! error stream. This keeps the path usable while the process is
//! already failing, and it is the only way runtime faults and fatal
//! compile errors are reported.

use std::io::{self, Write};

use crate::error::RuntimeError;

/// Enough room for `-9223372036854775808`.
const INT_BUFFER_LEN: usize = 20;

pub fn write_string<W, M>(out: &mut W, message: &M) -> io::Result<()>
where
    W: Write,
    M: AsRef<[u8]> + ?Sized
{
    out.write_all(message.as_ref())
}

/// Writes `value` in signed decimal.
pub fn write_integer<W: Write>(out: &mut W, value: i64) -> io::Result<()> {
    let mut buf = [0u8; INT_BUFFER_LEN];
    let mut pos = INT_BUFFER_LEN;
    let mut magnitude = value.unsigned_abs();

    loop {
        pos -= 1;
        buf[pos] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }
    out.write_all(&buf[pos..])
}

// Failures writing to stderr have nowhere left to be reported.
pub fn print_string<M: AsRef<[u8]> + ?Sized>(message: &M) {
    let _ = write_string(&mut io::stderr().lock(), message);
}

pub fn print_integer(value: i64) {
    let _ = write_integer(&mut io::stderr().lock(), value);
}

pub fn print_newline() {
    print_string("\n");
}

pub fn write_fault<W: Write>(out: &mut W, err: &RuntimeError) -> io::Result<()> {
    write_string(out, "[RUNTIME ERROR] ")?;
    write!(out, "{err}")?;
    write_string(out, "\n")
}

/// Reports a runtime fault and terminates with status 1.
pub fn fatal(err: &RuntimeError) -> ! {
    let _ = write_fault(&mut io::stderr().lock(), err);
    std::process::exit(1)
}

pub fn write_panic<W, M>(out: &mut W, message: &M) -> io::Result<()>
where
    W: Write,
    M: AsRef<[u8]> + ?Sized
{
    write_string(out, "PANIC: ")?;
    write_string(out, message)?;
    write_string(out, "\n")
}

pub fn runtime_panic<M: AsRef<[u8]> + ?Sized>(message: &M) -> ! {
    let _ = write_panic(&mut io::stderr().lock(), message);
    std::process::exit(1)
}

/// Returns `true` when the assertion holds, otherwise writes the failure.
pub fn check_assert<W, M>(out: &mut W, condition: i64, message: &M) -> io::Result<bool>
where
    W: Write,
    M: AsRef<[u8]> + ?Sized
{
    if condition != 0 {
        return Ok(true);
    }
    write_string(out, "ASSERTION FAILED: ")?;
    write_string(out, message)?;
    write_string(out, "\n")?;
    Ok(false)
}

pub fn runtime_assert<M: AsRef<[u8]> + ?Sized>(condition: i64, message: &M) {
    if !matches!(check_assert(&mut io::stderr().lock(), condition, message), Ok(true)) {
        std::process::exit(1);
    }
}

pub fn exit_with_code(code: i64) -> ! {
    std::process::exit(code as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_integer(value: i64) -> String {
        let mut out = Vec::new();
        write_integer(&mut out, value).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_integer_extremes() {
        assert_eq!(render_integer(0), "0");
        assert_eq!(render_integer(7), "7");
        assert_eq!(render_integer(-42), "-42");
        assert_eq!(render_integer(1_000_000), "1000000");
        assert_eq!(render_integer(i64::MAX), "9223372036854775807");
        assert_eq!(render_integer(i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn test_write_string_is_raw() {
        let mut out = Vec::new();
        write_string(&mut out, "line\n\ttab").unwrap();
        assert_eq!(out, b"line\n\ttab");
    }

    #[test]
    fn test_fault_message_format() {
        let mut out = Vec::new();
        write_fault(&mut out, &RuntimeError::IndexOutOfRange { index: 5, length: 2 }).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[RUNTIME ERROR] List index out of bounds: 5 (list length: 2)\n"
        );
    }

    #[test]
    fn test_panic_message_format() {
        let mut out = Vec::new();
        write_panic(&mut out, "boom").unwrap();
        assert_eq!(out, b"PANIC: boom\n");
    }

    #[test]
    fn test_assert_only_reports_on_zero() {
        let mut out = Vec::new();
        assert!(check_assert(&mut out, 1, "never shown").unwrap());
        assert!(out.is_empty());

        assert!(!check_assert(&mut out, 0, "x > 0").unwrap());
        assert_eq!(out, b"ASSERTION FAILED: x > 0\n");
    }
}
