use std::{
    fs::{read_to_string, write},
    path::PathBuf,
    process,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use splc::{
    assembler::assembler::{assemble, AssemblerConfig, DEFAULT_BASE, DEFAULT_STEP},
    compiler::compiler::compile,
    errors::errors::Error,
    format_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    scope::scope_resolver::analyze_scopes,
    type_checker::type_checker::type_check,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Line-numbered BASIC
    Basic,
    /// Lowered instructions with symbolic labels
    Intermediate,
    /// The parsed syntax tree
    Ast,
}

/// Compiles an SPL source file to line-numbered BASIC.
#[derive(Debug, Parser)]
#[command(name = "splc", version)]
struct Cli {
    /// SPL source file
    input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of the first line
    #[arg(long, default_value_t = DEFAULT_BASE)]
    base: u32,

    /// Distance between consecutive line numbers
    #[arg(long, default_value_t = DEFAULT_STEP, value_parser = clap::value_parser!(u32).range(1..))]
    step: u32,

    #[arg(long, value_enum, default_value_t = Emit::Basic)]
    emit: Emit,

    /// Do not print phase timings
    #[arg(short, long)]
    quiet: bool,
}

struct Driver<'a> {
    cli: &'a Cli,
    source: String,
    file_name: String,
}

impl<'a> Driver<'a> {
    fn report(&self, errors: &[Error]) -> ! {
        for error in errors {
            eprint!("{}", format_error(error, &self.source, &self.file_name));
        }

        process::exit(1);
    }

    fn timed<T>(&self, phase: &str, run: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = run();

        if !self.cli.quiet {
            eprintln!("{} in {:?}", phase, start.elapsed());
        }

        result
    }

    fn run(&self) -> String {
        let tokens = self
            .timed("Tokenized", || tokenize(&self.source))
            .unwrap_or_else(|error| self.report(&[error]));

        let program = self
            .timed("Parsed", || parse(tokens))
            .unwrap_or_else(|error| self.report(&[error]));

        if self.cli.emit == Emit::Ast {
            return format!("{:#?}\n", program);
        }

        let (symbols, scope_result) = self.timed("Scopes resolved", || analyze_scopes(&program));
        if !scope_result.success {
            self.report(&scope_result.errors);
        }

        let (_, type_result) = self.timed("Type checked", || type_check(&program, &symbols));
        if !type_result.success {
            self.report(&type_result.errors);
        }

        let instructions = self
            .timed("Compiled", || compile(&program, &symbols))
            .unwrap_or_else(|error| self.report(&[error]));

        if self.cli.emit == Emit::Intermediate {
            return instructions
                .iter()
                .map(|instruction| format!("{}\n", instruction))
                .collect();
        }

        let config = AssemblerConfig {
            base: self.cli.base,
            step: self.cli.step,
        };

        self.timed("Assembled", || assemble(instructions, &config))
            .unwrap_or_else(|error| self.report(&[error]))
            .to_string()
    }
}

fn main() {
    let cli = Cli::parse();

    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.input.display(), error);
            process::exit(1);
        }
    };

    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let driver = Driver {
        cli: &cli,
        source,
        file_name,
    };

    let start = Instant::now();
    let output = driver.run();

    if !cli.quiet {
        eprintln!("Total time: {:?}", start.elapsed());
    }

    match &cli.output {
        Some(path) => {
            if let Err(error) = write(path, output) {
                eprintln!("Failed to write {}: {}", path.display(), error);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
