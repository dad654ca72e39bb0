//! Engine configuration: which operators are recognized and how large a
//! truth table may grow.

use crate::token::BinaryOperator;

/// The binary operators a parser matches and an evaluator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSet {
    enabled: [bool; 7],
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self::all()
    }
}

impl OperatorSet {
    pub fn all() -> Self {
        Self { enabled: [true; 7] }
    }

    /// AND, OR, XOR, NAND and NOR only.
    pub fn basic() -> Self {
        Self::all()
            .without(BinaryOperator::Implication)
            .without(BinaryOperator::Equivalence)
    }

    pub fn without(mut self, op: BinaryOperator) -> Self {
        self.enabled[Self::slot(op)] = false;
        self
    }

    pub fn with(mut self, op: BinaryOperator) -> Self {
        self.enabled[Self::slot(op)] = true;
        self
    }

    pub fn contains(&self, op: BinaryOperator) -> bool {
        self.enabled[Self::slot(op)]
    }

    fn slot(op: BinaryOperator) -> usize {
        op as usize
    }
}

/// Resource limits for truth-table generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of distinct variables; the table has 2^n rows.
    pub max_table_variables: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_table_variables: 6,
        }
    }
}

impl Limits {
    pub fn new(max_table_variables: usize) -> Self {
        Self {
            max_table_variables,
        }
    }
}
