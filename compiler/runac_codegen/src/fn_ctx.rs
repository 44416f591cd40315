// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use indexmap::IndexMap;
use runac_errors::{CodegenErr, CodegenResult};
use runac_target::WORD_SIZE;

use crate::typedefs::*;

/// Hands out 8-byte stack slots below the frame base.
#[derive(Debug, Clone, Default)]
pub struct SlotAllocator {
    next_slot: usize,
    slot_size: usize
}

impl SlotAllocator {
    pub fn new(slot_size: usize) -> Self {
        Self {
            next_slot: 0,
            slot_size
        }
    }

    /// Reserves `count` consecutive slots and returns the offset of the
    /// lowest address among them.
    pub fn next(&mut self, count: usize) -> StackOffset {
        self.next_slot += count;
        self.next_slot * self.slot_size
    }

    pub fn total_space_used(&self) -> usize {
        self.next_slot * self.slot_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarKind {
    Scalar,

    /// Holds the address of a string literal.
    Str,

    /// Fields live at `offset - 8 * index`, i.e. upward from the base.
    Record {
        type_name: String,
        slots: usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub offset: StackOffset,
    pub kind: VarKind
}

/// Target labels of an enclosing `while`.
#[derive(Debug, Clone, Copy)]
pub struct LoopLabels {
    pub start: LabelId,
    pub end: LabelId
}

/// Holds function-specific context while one function is generated.
#[derive(Debug)]
pub struct FnCtx {
    pub name: String,

    variables: IndexMap<String, Variable>,

    slots: SlotAllocator,

    max_variables: usize,

    loops: Vec<LoopLabels>,

    /// Label of the single epilogue every `return` jumps to.
    pub exit_label: LabelId,

    /// Values currently pushed by expression evaluation.
    pub push_depth: usize
}

impl FnCtx {
    pub fn new(name: &str, max_variables: usize, exit_label: LabelId) -> Self {
        Self {
            name: name.to_string(),
            variables: IndexMap::new(),
            slots: SlotAllocator::new(WORD_SIZE),
            max_variables,
            loops: vec![],
            exit_label,
            push_depth: 0
        }
    }

    pub fn declare(&mut self, name: &str, kind: VarKind) -> CodegenResult<StackOffset> {
        if self.variables.contains_key(name) {
            return Err(CodegenErr::VariableAlreadyDefined {
                name: name.to_string(),
                function: self.name.clone()
            });
        }
        if self.variables.len() >= self.max_variables {
            return Err(CodegenErr::TooManyVariables {
                function: self.name.clone(),
                limit: self.max_variables
            });
        }

        let count = match &kind {
            VarKind::Scalar | VarKind::Str => 1,
            VarKind::Record { slots, .. } => *slots
        };
        let offset = self.slots.next(count);
        log::trace!("{}: `{name}` at -{offset}(%rbp) ({count} slot(s))", self.name);
        self.variables.insert(name.to_string(), Variable { offset, kind });
        Ok(offset)
    }

    pub fn lookup(&self, name: &str) -> CodegenResult<&Variable> {
        self.variables.get(name).ok_or_else(|| CodegenErr::UndefinedVariable {
            name: name.to_string(),
            function: self.name.clone()
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(name, var)| (name.as_str(), var))
    }

    pub fn frame_size(&self) -> usize {
        self.slots.total_space_used()
    }

    pub fn enter_loop(&mut self, labels: LoopLabels) {
        self.loops.push(labels);
    }

    pub fn exit_loop(&mut self) {
        self.loops.pop();
    }

    pub fn innermost_loop(&self) -> Option<LoopLabels> {
        self.loops.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_move_away_from_frame_base() {
        let mut ctx = FnCtx::new("main", 8, 0);
        assert_eq!(ctx.declare("a", VarKind::Scalar).unwrap(), 8);
        assert_eq!(ctx.declare("b", VarKind::Scalar).unwrap(), 16);

        let rec = VarKind::Record { type_name: "Point".into(), slots: 3 };
        assert_eq!(ctx.declare("p", rec).unwrap(), 40);
        assert_eq!(ctx.declare("c", VarKind::Scalar).unwrap(), 48);
        assert_eq!(ctx.frame_size(), 48);
    }

    #[test]
    fn test_no_shadowing() {
        let mut ctx = FnCtx::new("main", 8, 0);
        ctx.declare("a", VarKind::Scalar).unwrap();
        assert!(matches!(
            ctx.declare("a", VarKind::Scalar),
            Err(CodegenErr::VariableAlreadyDefined { .. })
        ));
    }

    #[test]
    fn test_variable_limit() {
        let mut ctx = FnCtx::new("f", 2, 0);
        ctx.declare("a", VarKind::Scalar).unwrap();
        ctx.declare("b", VarKind::Scalar).unwrap();
        match ctx.declare("c", VarKind::Scalar) {
            Err(CodegenErr::TooManyVariables { function, limit }) => {
                assert_eq!(function, "f");
                assert_eq!(limit, 2);
            },
            other => panic!("expected TooManyVariables, got {other:?}")
        }
    }

    #[test]
    fn test_lookup_and_loops() {
        let mut ctx = FnCtx::new("main", 4, 0);
        assert!(matches!(ctx.lookup("x"), Err(CodegenErr::UndefinedVariable { name, .. }) if name == "x"));

        assert!(ctx.innermost_loop().is_none());
        ctx.enter_loop(LoopLabels { start: 1, end: 2 });
        ctx.enter_loop(LoopLabels { start: 3, end: 4 });
        assert_eq!(ctx.innermost_loop().map(|l| l.start), Some(3));
        ctx.exit_loop();
        assert_eq!(ctx.innermost_loop().map(|l| l.end), Some(2));
    }
}
