use std::{fmt::Display, io};

use log::debug;
use miette::Diagnostic;
use thiserror::Error;

use crate::{
    ast::Ast,
    config::Limits,
    eval::{EvaluationError, Evaluator, VariableContext},
    token::Variable,
};

#[derive(Error, Debug, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum TruthTableError {
    #[error("Cannot generate a truth table from an expression with no variables")]
    #[diagnostic(help("use at least one variable A-F in the expression"))]
    NoVariables,

    #[error("Expression uses {count} variables, the limit is {max}")]
    #[diagnostic(help("the table would have 2^{count} rows"))]
    TooManyVariables { count: usize, max: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRow {
    /// Aligned with [`TruthTable::variables`].
    pub variable_values: Vec<bool>,
    pub result: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    /// Sorted alphabetically.
    pub variables: Vec<Variable>,
    /// One row per assignment, in ascending binary count with the first variable most significant.
    pub rows: Vec<TruthTableRow>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TruthTableGenerator {
    evaluator: Evaluator,
    limits: Limits,
}

impl TruthTableGenerator {
    pub fn new(evaluator: Evaluator, limits: Limits) -> Self {
        TruthTableGenerator { evaluator, limits }
    }

    pub fn generate(&self, ast: &Ast) -> Result<TruthTable, TruthTableError> {
        let variables = ast.sorted_variables();
        let count = variables.len();

        if count == 0 {
            return Err(TruthTableError::NoVariables);
        }
        if count > self.limits.max_table_variables {
            return Err(TruthTableError::TooManyVariables {
                count,
                max: self.limits.max_table_variables,
            });
        }

        let rows = (0..1usize << count)
            .map(|assignment| {
                let variable_values: Vec<bool> = (0..count)
                    .map(|position| (assignment >> (count - 1 - position)) & 1 == 1)
                    .collect();

                let context: VariableContext = variables
                    .iter()
                    .copied()
                    .zip(variable_values.iter().copied())
                    .collect();

                let result = self.evaluator.value(ast, &context)?;
                Ok(TruthTableRow {
                    variable_values,
                    result,
                })
            })
            .collect::<Result<Vec<_>, TruthTableError>>()?;

        debug!("generated {} rows over {count} variables for `{ast}`", rows.len());

        Ok(TruthTable { variables, rows })
    }
}

impl TruthTable {
    /// Writes one header line of variable names plus `Result`, then one line per
    /// row with `1`/`0` cells. Every line ends with `\n`.
    pub fn write_csv(&self, mut out: impl io::Write) -> io::Result<()> {
        for variable in &self.variables {
            write!(out, "{variable},")?;
        }
        writeln!(out, "Result")?;

        for row in &self.rows {
            for &value in &row.variable_values {
                write!(out, "{},", bit(value))?;
            }
            writeln!(out, "{}", bit(row.result))?;
        }
        Ok(())
    }

    pub fn to_csv(&self) -> String {
        let mut out = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_csv(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

fn bit(value: bool) -> char {
    if value { '1' } else { '0' }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for variable in &self.variables {
            write!(f, "{variable} | ")?;
        }
        writeln!(f, "Result")?;

        for _ in &self.variables {
            write!(f, "--+-")?;
        }
        writeln!(f, "------")?;

        for row in &self.rows {
            for &value in &row.variable_values {
                write!(f, "{} | ", bit(value))?;
            }
            writeln!(f, "{}", bit(row.result))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::OperatorSet, parse::Parser, token::Token};

    fn ast(symbols: &str) -> Ast {
        Parser::new()
            .parse(&Token::from_symbols(symbols).unwrap())
            .unwrap()
    }

    fn row(variable_values: &[bool], result: bool) -> TruthTableRow {
        TruthTableRow {
            variable_values: variable_values.to_vec(),
            result,
        }
    }

    #[test]
    fn single_variable() {
        let table = TruthTableGenerator::default().generate(&ast("A")).unwrap();
        assert_eq!(table.variables, vec![Variable::A]);
        assert_eq!(table.rows, vec![row(&[false], false), row(&[true], true)]);
    }

    #[test]
    fn two_variables_in_binary_count_order() {
        let table = TruthTableGenerator::default()
            .generate(&ast("A AND B"))
            .unwrap();
        assert_eq!(
            table.rows,
            vec![
                row(&[false, false], false),
                row(&[false, true], false),
                row(&[true, false], false),
                row(&[true, true], true),
            ]
        );
    }

    #[test]
    fn negated_group() {
        let table = TruthTableGenerator::default()
            .generate(&ast("NOT ( A AND B )"))
            .unwrap();
        let results: Vec<bool> = table.rows.iter().map(|row| row.result).collect();
        assert_eq!(results, vec![true, true, true, false]);
    }

    #[test]
    fn variables_sorted_alphabetically() {
        let table = TruthTableGenerator::default()
            .generate(&ast("F OR A AND NOT F"))
            .unwrap();
        assert_eq!(table.variables, vec![Variable::A, Variable::F]);
        assert!(table.rows.iter().all(|row| row.variable_values.len() == 2));
        // first variable is the most significant bit
        assert_eq!(table.rows[1].variable_values, vec![false, true]);
        assert_eq!(table.rows[2].variable_values, vec![true, false]);
    }

    #[test]
    fn row_count_is_a_power_of_two() {
        let table = TruthTableGenerator::default()
            .generate(&ast("A XOR B XOR C XOR D XOR E XOR F"))
            .unwrap();
        assert_eq!(table.rows.len(), 64);
        for (index, row) in table.rows.iter().enumerate() {
            assert_eq!(row.result, index.count_ones() % 2 == 1);
        }
    }

    #[test]
    fn no_variables() {
        let err = TruthTableGenerator::default()
            .generate(&ast("TRUE OR FALSE"))
            .unwrap_err();
        assert_eq!(err, TruthTableError::NoVariables);
    }

    #[test]
    fn too_many_variables() {
        let generator = TruthTableGenerator::new(Evaluator::new(), Limits::new(2));
        let err = generator.generate(&ast("A OR B OR C")).unwrap_err();
        assert_eq!(err, TruthTableError::TooManyVariables { count: 3, max: 2 });
    }

    #[test]
    fn evaluation_errors_propagate() {
        let generator = TruthTableGenerator::new(
            Evaluator::with_operators(OperatorSet::basic()),
            Limits::default(),
        );
        let err = generator.generate(&ast("A <=> B")).unwrap_err();
        assert!(matches!(err, TruthTableError::Evaluation(_)));
    }

    #[test]
    fn csv_export() {
        let table = TruthTableGenerator::default()
            .generate(&ast("A -> B"))
            .unwrap();
        assert_eq!(
            table.to_csv(),
            "A,B,Result\n0,0,1\n0,1,1\n1,0,0\n1,1,1\n"
        );
    }

    #[test]
    fn text_rendering() {
        let table = TruthTableGenerator::default().generate(&ast("NOT A")).unwrap();
        assert_eq!(table.to_string(), "A | Result\n--+-------\n0 | 1\n1 | 0\n");
    }
}
