// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

pub mod abi;
pub mod asm;

/// Every value the backend handles is one machine word.
pub const WORD_SIZE: usize = 8;

/// Required `%rsp` alignment at a `call` instruction.
pub const STACK_ALIGNMENT: usize = 16;

/// Align the given size into a size divisible by 16.
pub fn align_to_16(value: usize) -> usize {
    (value + STACK_ALIGNMENT - 1) & !(STACK_ALIGNMENT - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_to_16() {
        assert_eq!(align_to_16(0), 0);
        assert_eq!(align_to_16(8), 16);
        assert_eq!(align_to_16(16), 16);
        assert_eq!(align_to_16(24), 32);
    }
}
