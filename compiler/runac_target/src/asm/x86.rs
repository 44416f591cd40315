// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum X86RegName {
    RAX,
    RBX,
    RCX,
    RDX,
    RSI,
    RDI,
    RSP,
    RBP,
    R8,
    R9,
    R10,
    R11,
}

impl X86RegName {
    /// Textual name of the 64-bit register.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RAX => "rax",
            Self::RBX => "rbx",
            Self::RCX => "rcx",
            Self::RDX => "rdx",
            Self::RSI => "rsi",
            Self::RDI => "rdi",
            Self::RSP => "rsp",
            Self::RBP => "rbp",
            Self::R8 => "r8",
            Self::R9 => "r9",
            Self::R10 => "r10",
            Self::R11 => "r11",
        }
    }

    /// Name of the low byte, used by `setcc`.
    pub fn byte_name(&self) -> &'static str {
        match self {
            Self::RAX => "al",
            Self::RBX => "bl",
            Self::RCX => "cl",
            Self::RDX => "dl",
            Self::RSI => "sil",
            Self::RDI => "dil",
            Self::RSP => "spl",
            Self::RBP => "bpl",
            Self::R8 => "r8b",
            Self::R9 => "r9b",
            Self::R10 => "r10b",
            Self::R11 => "r11b",
        }
    }
}

/// AT&T operand form, e.g. `%rax`.
impl fmt::Display for X86RegName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.name())
    }
}

/// System V integer argument registers, in order.
pub const ARG_REGISTERS: [X86RegName; 6] = [
    X86RegName::RDI,
    X86RegName::RSI,
    X86RegName::RDX,
    X86RegName::RCX,
    X86RegName::R8,
    X86RegName::R9,
];

/// Return value register.
pub const RETURN_REGISTER: X86RegName = X86RegName::RAX;

/// Scratch register holding the left operand after a pop.
pub const SCRATCH_REGISTER: X86RegName = X86RegName::RCX;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_names() {
        assert_eq!(X86RegName::RAX.to_string(), "%rax");
        assert_eq!(X86RegName::R8.name(), "r8");
        assert_eq!(X86RegName::RAX.byte_name(), "al");
        assert_eq!(ARG_REGISTERS.map(|r| r.name()), ["rdi", "rsi", "rdx", "rcx", "r8", "r9"]);
    }
}
