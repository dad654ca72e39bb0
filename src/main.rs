use std::io::{Write, stdout};

use clap::{Args as ClapArgs, Parser, Subcommand};
use logic_lab::{
    Ast, Evaluator, Limits, OperatorSet, Token, TruthTableGenerator, UnknownSymbolError, Variable,
    VariableContext,
};
use miette::{IntoDiagnostic, WrapErr};

#[derive(Parser, Debug)]
#[command(version, about = "Parse, evaluate and tabulate boolean expressions")]
struct Args {
    /// Only recognize AND, OR, XOR, NAND and NOR
    #[arg(long, global = true)]
    basic: bool,

    /// Largest number of variables a truth table may span
    #[arg(long, global = true, default_value_t = Limits::default().max_table_variables)]
    max_variables: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, ClapArgs)]
struct Expression {
    /// Token symbols, e.g. `NOT ( A AND B )`; spell `->` as IMPLICATION or pass it after `--`
    #[arg(required = true)]
    symbols: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Parse {
        #[command(flatten)]
        expression: Expression,
    },
    Eval {
        #[command(flatten)]
        expression: Expression,

        /// Variable assignment such as `A=1` or `B=false`
        #[arg(short = 's', long = "set", value_parser = parse_assignment)]
        assignments: Vec<(Variable, bool)>,

        /// Print every reduction step
        #[arg(long)]
        steps: bool,
    },
    Table {
        #[command(flatten)]
        expression: Expression,

        /// Emit comma-separated values
        #[arg(long)]
        csv: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(Variable, bool), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected VARIABLE=VALUE, got `{raw}`"))?;
    let variable = name
        .trim()
        .parse::<Variable>()
        .map_err(|_| format!("`{name}` is not a variable A-F"))?;
    let value = match value.trim() {
        "1" | "true" | "TRUE" => true,
        "0" | "false" | "FALSE" => false,
        other => return Err(format!("`{other}` is not a truth value")),
    };
    Ok((variable, value))
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    let operators = if args.basic {
        OperatorSet::basic()
    } else {
        OperatorSet::all()
    };
    let evaluator = Evaluator::with_operators(operators);

    match args.command {
        Commands::Parse { expression } => {
            let ast = parse_or_exit(&expression, operators);
            println!("{ast}");
            let names: Vec<&str> = ast.variables().iter().map(|v| v.name()).collect();
            println!("variables: {}", names.join(", "));
        }
        Commands::Eval {
            expression,
            assignments,
            steps,
        } => {
            let ast = parse_or_exit(&expression, operators);
            let context: VariableContext = assignments.into_iter().collect();
            let evaluation = evaluator.evaluate(&ast, &context)?;
            if steps {
                for (index, step) in evaluation.steps.iter().enumerate() {
                    println!("{index:>3}: {step}");
                }
            }
            println!("{}", if evaluation.result { "TRUE" } else { "FALSE" });
        }
        Commands::Table { expression, csv } => {
            let ast = parse_or_exit(&expression, operators);
            let generator = TruthTableGenerator::new(evaluator, Limits::new(args.max_variables));
            let table = generator.generate(&ast)?;
            if csv {
                table
                    .write_csv(stdout().lock())
                    .into_diagnostic()
                    .wrap_err("writing csv failed")?;
            } else {
                write!(stdout(), "{table}")
                    .into_diagnostic()
                    .wrap_err("writing table failed")?;
            }
        }
    }
    Ok(())
}

/// Decodes and parses the symbols, exiting with 65 on malformed input.
fn parse_or_exit(expression: &Expression, operators: OperatorSet) -> Ast {
    let whole = expression.symbols.join(" ");

    let tokens = match Token::from_symbols(&whole) {
        Ok(tokens) => tokens,
        Err(e) => exit_with(e),
    };

    match logic_lab::Parser::with_operators(operators).parse(&tokens) {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("[token {}] Error: {}", e.token_index, e.message());
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(65);
        }
    }
}

fn exit_with(e: UnknownSymbolError) -> ! {
    eprintln!("Error: Unknown symbol: {}", e.symbol);
    eprintln!("{:?}", miette::Report::new(e));
    std::process::exit(65);
}
