use std::{fmt::Display, str::FromStr};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Unknown symbol '{symbol}'")]
#[diagnostic(help(
    "use a variable A-F, TRUE, FALSE, NOT, AND, OR, XOR, NAND, NOR, ->, <=>, `(` or `)`"
))]
pub struct UnknownSymbolError {
    #[source_code]
    src: NamedSource<String>,

    #[label("this symbol")]
    bad_bit: SourceSpan,

    pub symbol: String,
}

impl UnknownSymbolError {
    pub fn new(symbol: &str) -> Self {
        UnknownSymbolError {
            src: NamedSource::new("<symbols>", symbol.to_string()),
            bad_bit: SourceSpan::from(0..symbol.len()),
            symbol: symbol.to_string(),
        }
    }

    /// Points the diagnostic at `offset` inside a longer symbol listing.
    pub fn within(mut self, whole: &str, offset: usize) -> Self {
        self.src = NamedSource::new("<symbols>", whole.to_string());
        self.bad_bit = SourceSpan::from(offset..offset + self.symbol.len());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Variable::A,
        Variable::B,
        Variable::C,
        Variable::D,
        Variable::E,
        Variable::F,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variable::A => "A",
            Variable::B => "B",
            Variable::C => "C",
            Variable::D => "D",
            Variable::E => "E",
            Variable::F => "F",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Implication,
    Equivalence,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 7] = [
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::Xor,
        BinaryOperator::Nand,
        BinaryOperator::Nor,
        BinaryOperator::Implication,
        BinaryOperator::Equivalence,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Xor => "XOR",
            BinaryOperator::Nand => "NAND",
            BinaryOperator::Nor => "NOR",
            BinaryOperator::Implication => "->",
            BinaryOperator::Equivalence => "<=>",
        }
    }

    pub fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BinaryOperator::And => lhs && rhs,
            BinaryOperator::Or => lhs || rhs,
            BinaryOperator::Xor => lhs != rhs,
            BinaryOperator::Nand => !(lhs && rhs),
            BinaryOperator::Nor => !(lhs || rhs),
            BinaryOperator::Implication => !lhs || rhs,
            BinaryOperator::Equivalence => lhs == rhs,
        }
    }

    /// Left and right binding power; loosest first, every level left-associative.
    pub fn infix_binding_power(self) -> (u8, u8) {
        match self {
            BinaryOperator::Equivalence => (1, 2),
            BinaryOperator::Implication => (3, 4),
            BinaryOperator::Or => (5, 6),
            BinaryOperator::Xor => (7, 8),
            BinaryOperator::Nor => (9, 10),
            BinaryOperator::And => (11, 12),
            BinaryOperator::Nand => (13, 14),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
}

impl UnaryOperator {
    pub fn apply(self, operand: bool) -> bool {
        match self {
            UnaryOperator::Not => !operand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parenthesis {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Variable(Variable),
    Binary(BinaryOperator),
    Unary(UnaryOperator),
    Paren(Parenthesis),
    Literal(bool),
}

impl Token {
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Variable(variable) => variable.name(),
            Token::Binary(op) => op.symbol(),
            Token::Unary(UnaryOperator::Not) => "NOT",
            Token::Paren(Parenthesis::Open) => "(",
            Token::Paren(Parenthesis::Close) => ")",
            Token::Literal(true) => "TRUE",
            Token::Literal(false) => "FALSE",
        }
    }

    /// Decodes a whitespace-separated listing of symbols, one token per symbol.
    pub fn from_symbols(whole: &str) -> Result<Vec<Token>, UnknownSymbolError> {
        let mut tokens = Vec::new();
        let mut rest = whole;
        while let Some(start) = rest.find(|c: char| !c.is_whitespace()) {
            let end = rest[start..]
                .find(char::is_whitespace)
                .map_or(rest.len(), |len| start + len);
            let symbol = &rest[start..end];
            let offset = whole.len() - rest.len() + start;
            let token = symbol
                .parse()
                .map_err(|e: UnknownSymbolError| e.within(whole, offset))?;
            tokens.push(token);
            rest = &rest[end..];
        }
        Ok(tokens)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Token {
    type Err = UnknownSymbolError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Ok(match symbol {
            "A" => Token::Variable(Variable::A),
            "B" => Token::Variable(Variable::B),
            "C" => Token::Variable(Variable::C),
            "D" => Token::Variable(Variable::D),
            "E" => Token::Variable(Variable::E),
            "F" => Token::Variable(Variable::F),
            "AND" => Token::Binary(BinaryOperator::And),
            "OR" => Token::Binary(BinaryOperator::Or),
            "XOR" => Token::Binary(BinaryOperator::Xor),
            "NAND" => Token::Binary(BinaryOperator::Nand),
            "NOR" => Token::Binary(BinaryOperator::Nor),
            "->" | "IMPLICATION" => Token::Binary(BinaryOperator::Implication),
            "<=>" | "EQUIVALENCE" => Token::Binary(BinaryOperator::Equivalence),
            "NOT" => Token::Unary(UnaryOperator::Not),
            "(" => Token::Paren(Parenthesis::Open),
            ")" => Token::Paren(Parenthesis::Close),
            "TRUE" => Token::Literal(true),
            "FALSE" => Token::Literal(false),
            _ => return Err(UnknownSymbolError::new(symbol)),
        })
    }
}

impl FromStr for Variable {
    type Err = UnknownSymbolError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol.parse::<Token>()? {
            Token::Variable(variable) => Ok(variable),
            _ => Err(UnknownSymbolError::new(symbol)),
        }
    }
}
