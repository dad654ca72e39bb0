use std::fmt::Display;

use crate::token::{BinaryOperator, Parenthesis, Token, UnaryOperator, Variable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Literal(bool),
    Variable(Variable),
    Unary {
        operator: UnaryOperator,
        inner: Box<AstNode>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    /// Kept as its own node so grouping survives into rendered steps.
    Parenthesized(Box<AstNode>),
}

impl AstNode {
    pub fn not(inner: AstNode) -> Self {
        AstNode::Unary {
            operator: UnaryOperator::Not,
            inner: Box::new(inner),
        }
    }

    pub fn binary(left: AstNode, operator: BinaryOperator, right: AstNode) -> Self {
        AstNode::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn group(inner: AstNode) -> Self {
        AstNode::Parenthesized(Box::new(inner))
    }

    pub fn as_literal(&self) -> Option<bool> {
        match self {
            AstNode::Literal(value) => Some(*value),
            _ => None,
        }
    }

    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.push_tokens(&mut tokens);
        tokens
    }

    fn push_tokens(&self, tokens: &mut Vec<Token>) {
        match self {
            AstNode::Literal(value) => tokens.push(Token::Literal(*value)),
            AstNode::Variable(variable) => tokens.push(Token::Variable(*variable)),
            AstNode::Unary { operator, inner } => {
                tokens.push(Token::Unary(*operator));
                inner.push_tokens(tokens);
            }
            AstNode::Binary {
                operator,
                left,
                right,
            } => {
                left.push_tokens(tokens);
                tokens.push(Token::Binary(*operator));
                right.push_tokens(tokens);
            }
            AstNode::Parenthesized(inner) => {
                tokens.push(Token::Paren(Parenthesis::Open));
                inner.push_tokens(tokens);
                tokens.push(Token::Paren(Parenthesis::Close));
            }
        }
    }

    fn collect_variables(&self, variables: &mut Vec<Variable>) {
        match self {
            AstNode::Literal(_) => {}
            AstNode::Variable(variable) => {
                if !variables.contains(variable) {
                    variables.push(*variable);
                }
            }
            AstNode::Unary { inner, .. } | AstNode::Parenthesized(inner) => {
                inner.collect_variables(variables)
            }
            AstNode::Binary { left, right, .. } => {
                left.collect_variables(variables);
                right.collect_variables(variables);
            }
        }
    }
}

/// A parsed expression together with the variables it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    root: AstNode,
    variables: Vec<Variable>,
}

impl Ast {
    /// Wraps a hand-built tree, deriving its variables in first-occurrence order.
    pub fn new(root: AstNode) -> Self {
        let mut variables = Vec::new();
        root.collect_variables(&mut variables);
        Ast { root, variables }
    }

    pub(crate) fn from_parts(root: AstNode, variables: Vec<Variable>) -> Self {
        Ast { root, variables }
    }

    pub fn root(&self) -> &AstNode {
        &self.root
    }

    /// Referenced variables, without duplicates, in first-occurrence order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn sorted_variables(&self) -> Vec<Variable> {
        let mut variables = self.variables.clone();
        variables.sort();
        variables
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.root.tokens()
    }
}

impl Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for token in self.tokens() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
            first = false;
        }
        Ok(())
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}
