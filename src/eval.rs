use log::{debug, trace};
use miette::Diagnostic;
use thiserror::Error;

use crate::{
    ast::{Ast, AstNode},
    config::OperatorSet,
    token::{BinaryOperator, Variable},
};

#[derive(Error, Debug, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Variable {0} does not have a defined value")]
    #[diagnostic(help("assign TRUE or FALSE to {0} before evaluating"))]
    UnassignedVariable(Variable),

    #[error("Unknown operator: {0}")]
    #[diagnostic(help("this evaluator is not configured to apply `{0}`"))]
    UnsupportedOperator(BinaryOperator),
}

/// Truth values supplied by the caller, one slot per variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariableContext {
    values: [Option<bool>; 6],
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: Variable, value: bool) -> Self {
        self.set(variable, Some(value));
        self
    }

    /// `None` marks the variable as unassigned, which is not the same as `false`.
    pub fn set(&mut self, variable: Variable, value: Option<bool>) {
        self.values[variable.index()] = value;
    }

    pub fn get(&self, variable: Variable) -> Option<bool> {
        self.values[variable.index()]
    }

    fn lookup(&self, variable: Variable) -> Result<bool, EvaluationError> {
        self.get(variable)
            .ok_or(EvaluationError::UnassignedVariable(variable))
    }
}

impl FromIterator<(Variable, bool)> for VariableContext {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        let mut context = VariableContext::new();
        for (variable, value) in iter {
            context.set(variable, Some(value));
        }
        context
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    /// Rendered expression before any reduction, after each reduction, and
    /// finally as a single literal.
    pub steps: Vec<String>,
    pub result: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    operators: OperatorSet,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operators(operators: OperatorSet) -> Self {
        Evaluator { operators }
    }

    /// Reduces the expression one node at a time, recording every intermediate tree.
    ///
    /// Each step builds a new tree in which the first node, in post-order, whose
    /// operands are already literals is replaced by its value. The caller's tree
    /// is never modified.
    pub fn evaluate(
        &self,
        ast: &Ast,
        context: &VariableContext,
    ) -> Result<EvaluationResult, EvaluationError> {
        let mut current = ast.root().clone();
        let mut steps = vec![current.to_string()];

        let result = loop {
            if let Some(value) = current.as_literal() {
                break value;
            }
            current = self.reduce_next(&current, context)?;
            trace!("step {}: {current}", steps.len());
            steps.push(current.to_string());
        };

        debug!("evaluated `{ast}` to {result} in {} steps", steps.len());

        Ok(EvaluationResult { steps, result })
    }

    /// Computes the value without recording steps.
    pub fn value(&self, ast: &Ast, context: &VariableContext) -> Result<bool, EvaluationError> {
        self.value_of(ast.root(), context)
    }

    fn value_of(&self, node: &AstNode, context: &VariableContext) -> Result<bool, EvaluationError> {
        match node {
            AstNode::Literal(value) => Ok(*value),
            AstNode::Variable(variable) => context.lookup(*variable),
            AstNode::Unary { operator, inner } => Ok(operator.apply(self.value_of(inner, context)?)),
            AstNode::Binary {
                operator,
                left,
                right,
            } => {
                let lhs = self.value_of(left, context)?;
                let rhs = self.value_of(right, context)?;
                self.apply(*operator, lhs, rhs)
            }
            AstNode::Parenthesized(inner) => self.value_of(inner, context),
        }
    }

    fn apply(&self, operator: BinaryOperator, lhs: bool, rhs: bool) -> Result<bool, EvaluationError> {
        if !self.operators.contains(operator) {
            return Err(EvaluationError::UnsupportedOperator(operator));
        }
        Ok(operator.apply(lhs, rhs))
    }

    fn reduce_next(
        &self,
        node: &AstNode,
        context: &VariableContext,
    ) -> Result<AstNode, EvaluationError> {
        Ok(match node {
            AstNode::Literal(value) => AstNode::Literal(*value),
            AstNode::Variable(variable) => AstNode::Literal(context.lookup(*variable)?),
            AstNode::Unary { operator, inner } => match inner.as_literal() {
                Some(value) => AstNode::Literal(operator.apply(value)),
                None => AstNode::Unary {
                    operator: *operator,
                    inner: Box::new(self.reduce_next(inner, context)?),
                },
            },
            AstNode::Binary {
                operator,
                left,
                right,
            } => match (left.as_literal(), right.as_literal()) {
                (Some(lhs), Some(rhs)) => AstNode::Literal(self.apply(*operator, lhs, rhs)?),
                (Some(_), None) => AstNode::Binary {
                    operator: *operator,
                    left: left.clone(),
                    right: Box::new(self.reduce_next(right, context)?),
                },
                (None, _) => AstNode::Binary {
                    operator: *operator,
                    left: Box::new(self.reduce_next(left, context)?),
                    right: right.clone(),
                },
            },
            AstNode::Parenthesized(inner) => match inner.as_literal() {
                Some(value) => AstNode::Literal(value),
                None => AstNode::group(self.reduce_next(inner, context)?),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::Parser, token::Token};

    fn ast(symbols: &str) -> Ast {
        Parser::new()
            .parse(&Token::from_symbols(symbols).unwrap())
            .unwrap()
    }

    fn context(values: &[(Variable, bool)]) -> VariableContext {
        values.iter().copied().collect()
    }

    #[test]
    fn literal_root_has_a_single_step() {
        let result = Evaluator::new()
            .evaluate(&ast("TRUE"), &VariableContext::new())
            .unwrap();
        assert_eq!(result.steps, vec!["TRUE"]);
        assert!(result.result);
    }

    #[test]
    fn variable_root() {
        let result = Evaluator::new()
            .evaluate(&ast("B"), &context(&[(Variable::B, false)]))
            .unwrap();
        assert_eq!(result.steps, vec!["B", "FALSE"]);
        assert!(!result.result);
    }

    #[test]
    fn every_operator_over_both_operands() {
        let evaluator = Evaluator::new();
        for op in BinaryOperator::ALL {
            let expression = ast(&format!("A {} B", op.symbol()));
            for a in [false, true] {
                for b in [false, true] {
                    let ctx = context(&[(Variable::A, a), (Variable::B, b)]);
                    let result = evaluator.evaluate(&expression, &ctx).unwrap();
                    assert_eq!(result.result, op.apply(a, b), "{a} {op} {b}");
                    assert_eq!(evaluator.value(&expression, &ctx).unwrap(), result.result);
                }
            }
        }
    }

    #[test]
    fn steps_follow_reduction_order() {
        let result = Evaluator::new()
            .evaluate(
                &ast("NOT ( A AND B ) OR C"),
                &context(&[(Variable::A, true), (Variable::B, false), (Variable::C, false)]),
            )
            .unwrap();
        assert_eq!(
            result.steps,
            vec![
                "NOT ( A AND B ) OR C",
                "NOT ( TRUE AND B ) OR C",
                "NOT ( TRUE AND FALSE ) OR C",
                "NOT ( FALSE ) OR C",
                "NOT FALSE OR C",
                "TRUE OR C",
                "TRUE OR FALSE",
                "TRUE",
            ]
        );
        assert!(result.result);
    }

    #[test]
    fn literal_operands_are_not_reduced_again() {
        let result = Evaluator::new()
            .evaluate(&ast("TRUE AND ( FALSE )"), &VariableContext::new())
            .unwrap();
        assert_eq!(
            result.steps,
            vec!["TRUE AND ( FALSE )", "TRUE AND FALSE", "FALSE"]
        );
    }

    #[test]
    fn unassigned_variable_is_an_error() {
        let expression = ast("A OR TRUE");
        let err = Evaluator::new()
            .evaluate(&expression, &VariableContext::new())
            .unwrap_err();
        assert_eq!(err, EvaluationError::UnassignedVariable(Variable::A));
        assert_eq!(err.to_string(), "Variable A does not have a defined value");

        let mut ctx = context(&[(Variable::A, true)]);
        ctx.set(Variable::A, None);
        assert!(Evaluator::new().value(&expression, &ctx).is_err());
    }

    #[test]
    fn unsupported_operator_is_an_error() {
        let evaluator = Evaluator::with_operators(OperatorSet::basic());
        let expression = Ast::new(AstNode::binary(
            AstNode::Variable(Variable::A),
            BinaryOperator::Implication,
            AstNode::Literal(true),
        ));
        let ctx = context(&[(Variable::A, true)]);
        let err = evaluator.evaluate(&expression, &ctx).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::UnsupportedOperator(BinaryOperator::Implication)
        );
        assert_eq!(err.to_string(), "Unknown operator: ->");
        assert_eq!(evaluator.value(&expression, &ctx), Err(err));
    }

    #[test]
    fn caller_tree_and_context_are_untouched() {
        let expression = ast("( A XOR B ) NAND NOT C");
        let before = expression.clone();
        let ctx = context(&[(Variable::A, true), (Variable::B, true), (Variable::C, true)]);
        let first = Evaluator::new().evaluate(&expression, &ctx).unwrap();
        let second = Evaluator::new().evaluate(&expression, &ctx).unwrap();
        assert_eq!(expression, before);
        assert_eq!(first, second);
        assert_eq!(ctx.get(Variable::A), Some(true));
    }
}
