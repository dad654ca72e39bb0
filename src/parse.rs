//! Recursive-descent parser from a token sequence to an [`Ast`].
//!
//! Binary operators are folded by binding power, loosest first:
//!
//! ```text
//! <=>  ->  OR  XOR  NOR  AND  NAND  NOT  primary
//! ```
//!
//! Every binary level is left-associative. `NOT` applies to exactly one
//! primary, so `NOT NOT A` is rejected; write `NOT ( NOT A )` instead.

use log::debug;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::{
    ast::{Ast, AstNode},
    config::OperatorSet,
    token::{Parenthesis, Token, UnaryOperator, Variable},
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsingErrorKind {
    #[error("Unexpected token")]
    UnexpectedToken,
    #[error("Expected a boolean value (TRUE / FALSE) or a variable")]
    ExpectedOperand,
    #[error("Expected a closing parenthesis ')'")]
    ExpectedClosingParenthesis,
}

impl ParsingErrorKind {
    fn help(self) -> &'static str {
        match self {
            ParsingErrorKind::UnexpectedToken => {
                "a complete expression ends here; join the rest with an operator"
            }
            ParsingErrorKind::ExpectedOperand => "use TRUE, FALSE, a variable or `(` here",
            ParsingErrorKind::ExpectedClosingParenthesis => "close the group with `)`",
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
#[error("{kind}")]
pub struct ParsingError {
    pub kind: ParsingErrorKind,

    /// Index of the offending token; equal to the input length at end of input.
    pub token_index: usize,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    bad_bit: SourceSpan,

    #[help]
    help: &'static str,
}

impl ParsingError {
    fn build(kind: ParsingErrorKind, tokens: &[Token], token_index: usize) -> Self {
        let mut whole = String::new();
        let mut span = None;
        for (index, token) in tokens.iter().enumerate() {
            if index > 0 {
                whole.push(' ');
            }
            if index == token_index {
                span = Some(SourceSpan::from(whole.len()..whole.len() + token.symbol().len()));
            }
            whole.push_str(token.symbol());
        }
        let bad_bit = span.unwrap_or_else(|| SourceSpan::from(whole.len()..whole.len()));

        ParsingError {
            kind,
            token_index,
            src: NamedSource::new("<expression>", whole),
            bad_bit,
            help: kind.help(),
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Parser configuration; every call to [`Parser::parse`] starts from a fresh cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    operators: OperatorSet,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operators(operators: OperatorSet) -> Self {
        Parser { operators }
    }

    pub fn parse(&self, tokens: &[Token]) -> Result<Ast, ParsingError> {
        let mut cursor = Cursor {
            tokens,
            position: 0,
            operators: self.operators,
            variables: Vec::new(),
        };

        let root = cursor.parse_within(0)?;

        if cursor.position < tokens.len() {
            return Err(cursor.error(ParsingErrorKind::UnexpectedToken));
        }

        debug!(
            "parsed {} tokens into `{root}` using {} variables",
            tokens.len(),
            cursor.variables.len()
        );

        Ok(Ast::from_parts(root, cursor.variables))
    }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    position: usize,
    operators: OperatorSet,
    variables: Vec<Variable>,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&self, kind: ParsingErrorKind) -> ParsingError {
        ParsingError::build(kind, self.tokens, self.position)
    }

    fn parse_within(&mut self, min_bp: u8) -> Result<AstNode, ParsingError> {
        let mut lhs = self.parse_not()?;

        loop {
            let op = match self.peek() {
                Some(Token::Binary(op)) if self.operators.contains(op) => op,
                _ => break,
            };

            let (l_bp, r_bp) = op.infix_binding_power();
            if l_bp < min_bp {
                break;
            }
            self.advance();

            let rhs = self.parse_within(r_bp)?;
            lhs = AstNode::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<AstNode, ParsingError> {
        if let Some(Token::Unary(UnaryOperator::Not)) = self.peek() {
            self.advance();
            let inner = self.parse_primary()?;
            return Ok(AstNode::not(inner));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<AstNode, ParsingError> {
        match self.peek() {
            Some(Token::Literal(value)) => {
                self.advance();
                Ok(AstNode::Literal(value))
            }
            Some(Token::Variable(variable)) => {
                self.advance();
                if !self.variables.contains(&variable) {
                    self.variables.push(variable);
                }
                Ok(AstNode::Variable(variable))
            }
            Some(Token::Paren(Parenthesis::Open)) => {
                self.advance();
                let inner = self.parse_within(0)?;
                match self.peek() {
                    Some(Token::Paren(Parenthesis::Close)) => {
                        self.advance();
                        Ok(AstNode::group(inner))
                    }
                    _ => Err(self.error(ParsingErrorKind::ExpectedClosingParenthesis)),
                }
            }
            _ => Err(self.error(ParsingErrorKind::ExpectedOperand)),
        }
    }
}
