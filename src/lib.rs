//! A boolean-expression engine over pre-tokenized input.
//!
//! Tokens are parsed into an [`Ast`], which can be evaluated against a
//! [`VariableContext`] (optionally with every reduction step) or expanded
//! into a [`TruthTable`].
//!
//! ```
//! use logic_lab::{Token, Variable, VariableContext};
//!
//! let tokens = Token::from_symbols("NOT ( A AND B )").unwrap();
//! let ast = logic_lab::parse(&tokens).unwrap();
//!
//! let context = VariableContext::new()
//!     .with(Variable::A, true)
//!     .with(Variable::B, false);
//! let evaluation = logic_lab::evaluate(&ast, &context).unwrap();
//! assert!(evaluation.result);
//! assert_eq!(evaluation.steps.last().unwrap(), "TRUE");
//!
//! let table = logic_lab::generate_truth_table(&ast).unwrap();
//! assert_eq!(table.rows.len(), 4);
//! ```

pub mod ast;
pub mod config;
pub mod eval;
pub mod parse;
pub mod table;
pub mod token;

pub use ast::{Ast, AstNode};
pub use config::{Limits, OperatorSet};
pub use eval::{EvaluationError, EvaluationResult, Evaluator, VariableContext};
pub use parse::{Parser, ParsingError, ParsingErrorKind};
pub use table::{TruthTable, TruthTableError, TruthTableGenerator, TruthTableRow};
pub use token::{BinaryOperator, Parenthesis, Token, UnaryOperator, UnknownSymbolError, Variable};

pub fn parse(tokens: &[Token]) -> Result<Ast, ParsingError> {
    Parser::new().parse(tokens)
}

pub fn evaluate(ast: &Ast, context: &VariableContext) -> Result<EvaluationResult, EvaluationError> {
    Evaluator::new().evaluate(ast, context)
}

pub fn generate_truth_table(ast: &Ast) -> Result<TruthTable, TruthTableError> {
    TruthTableGenerator::default().generate(ast)
}
