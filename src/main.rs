use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use toylang::lexer::{tokenize, TokenKind};
use toylang::parser::{render_program, Node, Parser};

#[derive(ClapParser)]
#[command(name = "toylang")]
#[command(about = "Lexer and parser for the toy language", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the input file and print tokens
    Lex {
        /// Input file path, `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parse the input file and print the AST
    Parse {
        /// Input file path, `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Stop at the first syntax error instead of recovering
        #[arg(long)]
        strict: bool,

        /// How to print the statements
        #[arg(short, long, value_enum, default_value_t = Format::Debug)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented debug tree
    Debug,
    /// Source text, expressions fully parenthesized
    Source,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Lex { file } => lex_file(&file)?,
        Commands::Parse {
            file,
            strict,
            format,
        } => parse_file(&file, strict, format)?,
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read file '{}'", path.display()))
}

fn lex_file(path: &Path) -> Result<()> {
    let input = read_input(path)?;
    let tokens = tokenize(&input);

    println!("Tokens:");
    println!("-------");
    for token in &tokens {
        println!(
            "{}:{}:{} {:?} {:?}",
            path.display(),
            token.pos.line,
            token.pos.column,
            token.kind,
            token.lexeme
        );
        if let Some(err) = token.lexical_error() {
            eprintln!("{}: warning: {}", path.display(), err);
        }
    }

    let invalid = tokens.iter().filter(|t| t.kind == TokenKind::Invalid).count();
    println!("\nTotal tokens: {} ({} invalid)", tokens.len(), invalid);

    Ok(())
}

fn parse_file(path: &Path, strict: bool, format: Format) -> Result<()> {
    let input = read_input(path)?;
    let mut parser = Parser::new(tokenize(&input));

    if strict {
        let statements = parser
            .try_parse_program()
            .with_context(|| format!("failed to parse '{}'", path.display()))?;
        print_statements(&statements, format);
        return Ok(());
    }

    let outcome = parser.parse_program();
    print_statements(&outcome.statements, format);

    for err in &outcome.errors {
        let pos = err.position();
        eprintln!("{}:{}:{}: error: {}", path.display(), pos.line, pos.column, err);
    }

    if !outcome.is_ok() {
        bail!(
            "{} syntax error(s) in '{}'",
            outcome.errors.len(),
            path.display()
        );
    }

    Ok(())
}

fn print_statements(statements: &[Node], format: Format) {
    match format {
        Format::Debug => {
            println!("Program AST:");
            println!("============\n");
            for (i, stmt) in statements.iter().enumerate() {
                println!("[{i}]: {stmt:#?}");
            }
            println!("\n{} statement(s)", statements.len());
        }
        Format::Source => println!("{}", render_program(statements)),
    }
}
