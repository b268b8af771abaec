// Rill: lexer, parser and AST inspector

use std::fmt::Display;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser as CliParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use rill::parser::printer::render_tokens;
use rill::parser::{ArrayPolicy, AstPrinter, Lexer, Parser, ParserConfig, Precedence};
use rill::repl::Repl;
use rill::ui::{App, Inspection};

/// Parse Rill source and print its syntax tree. Starts an interactive shell
/// when no file is given.
#[derive(CliParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to parse.
    file: Option<PathBuf>,

    /// Print the token list before the syntax tree.
    #[arg(short, long)]
    tokens: bool,

    /// Browse source, tokens and syntax tree in a terminal UI.
    #[arg(short, long, requires = "file")]
    inspect: bool,

    /// Give comparisons lower precedence than `+` and `-`.
    #[arg(long)]
    standard_precedence: bool,

    /// Replace mixed-kind array literals with an empty array and warn,
    /// instead of failing.
    #[arg(long)]
    lenient_arrays: bool,

    /// Suppress progress messages on stderr.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::default();
        if self.standard_precedence {
            config = config.with_precedence(Precedence::Standard);
        }
        if self.lenient_arrays {
            config = config.with_array_policy(ArrayPolicy::WarnAndClear);
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.parser_config();

    let Some(path) = args.file.as_ref() else {
        if !args.quiet {
            eprintln!(
                "Rill {} interactive shell. Type :help for commands.",
                env!("CARGO_PKG_VERSION")
            );
        }
        let mut repl = Repl::new(config)
            .with_tokens(args.tokens)
            .with_color(io::stdout().is_terminal());
        repl.run(io::stdin().lock(), &mut io::stdout())?;
        return Ok(());
    };

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        process::exit(1);
    }

    let source = fs::read_to_string(path)?;

    if args.inspect {
        return run_inspector(Inspection::new(&source, config));
    }

    if !args.quiet {
        eprintln!("Parsing {}...", path.display());
    }

    let tokens = match Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("{}", located(path, e));
            process::exit(1);
        }
    };

    if args.tokens {
        print!("{}", render_tokens(&tokens));
    }

    let mut parser = Parser::with_config(config);
    parser.set_source(&source);
    let program = match parser.parse(tokens) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", located(path, e));
            process::exit(1);
        }
    };

    for warning in parser.warnings() {
        eprintln!("{}", located(path, format!("warning: {}", warning)));
    }

    if !args.quiet {
        eprintln!(
            "Parsed successfully. Found {} top-level statements.",
            program.nodes.len()
        );
    }

    print!("{}", AstPrinter::new().render_program(&program));
    Ok(())
}

/// Prefix a diagnostic with the file it came from
fn located(path: &Path, message: impl Display) -> String {
    format!("{}: {}", path.display(), message)
}

fn run_inspector(inspection: Inspection) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(inspection);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
