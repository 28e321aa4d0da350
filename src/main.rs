use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rox::ast_printer::AstPrinter;
use rox::scanner::Scanner;
use rox::{Lox, Status};

/// Bad command line.
const EXIT_USAGE: i32 = 64;
/// Script could not be read.
const EXIT_IO: i32 = 74;

#[derive(ClapParser, Debug)]
#[command(version, about = "Rox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to rox.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print one JSON object per token
        #[arg(long)]
        json: bool,
    },

    /// Parses a file and prints the syntax tree of every statement
    Parse { filename: PathBuf },

    /// Runs a file as a program
    Run { filename: PathBuf },

    /// Starts an interactive prompt (the default)
    Repl,
}

/// Load a script.  Non-empty files are memory-mapped and validated as UTF-8.
fn read_source(path: &Path) -> Result<String> {
    info!("Reading file: {:?}", path);

    let file = File::open(path).with_context(|| format!("Failed to open file {:?}", path))?;
    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat file {:?}", path))?
        .len();

    // Mapping a zero-length file is an error on some platforms.
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the map is read once, copied out immediately and dropped; the
    // interpreter never observes the mapping itself.
    let map = unsafe { Mmap::map(&file) }.with_context(|| format!("Failed to map file {:?}", path))?;

    let text = std::str::from_utf8(&map)
        .with_context(|| format!("File {:?} is not valid UTF-8", path))?
        .to_owned();

    info!("Read {} bytes from {:?}", text.len(), path);

    Ok(text)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("rox.log").context("Failed to create rox.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rox::").unwrap_or(module);
            writeln!(
                buf,
                "{} [{}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env() // RUST_LOG overrides the default level
        .init();

    info!("Logger initialized, writing to rox.log");
    Ok(())
}

/// Load a script or exit with the I/O status.
fn load_or_exit(path: &Path) -> String {
    match read_source(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(EXIT_IO);
        }
    }
}

fn tokenize(filename: &Path, json: bool) -> Result<Status> {
    let source = load_or_exit(filename);
    let mut status = Status::Ok;

    for item in Scanner::new(&source) {
        match item {
            Ok(token) if json => println!("{}", serde_json::to_string(&token)?),
            Ok(token) => println!("{}", token),
            Err(e) => {
                debug!("Tokenization error: {}", e);
                eprintln!("{}", e);
                status = Status::StaticError;
            }
        }
    }

    Ok(status)
}

fn parse(filename: &Path) -> Status {
    let source = load_or_exit(filename);
    let parsed = rox::parse(&source);

    for stmt in &parsed.statements {
        println!("{}", AstPrinter::print_stmt(stmt));
    }

    for e in &parsed.errors {
        eprintln!("{}", e);
    }

    if parsed.had_error() {
        Status::StaticError
    } else {
        Status::Ok
    }
}

fn repl() -> Result<Status> {
    let mut lox = Lox::new();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        // Each line stands alone: an error here does not affect the next one.
        let status = lox.run(&line);
        debug!("REPL line finished with {:?}", status);
    }

    Ok(Status::Ok)
}

fn main() -> Result<()> {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(EXIT_USAGE);
        }
        // --help / --version
        Err(e) => e.exit(),
    };

    if args.log {
        init_logger()?;
    }

    info!("CLI arguments: {:?}", args);

    let status = match args.commands {
        Some(Commands::Tokenize { filename, json }) => tokenize(&filename, json)?,
        Some(Commands::Parse { filename }) => parse(&filename),
        Some(Commands::Run { filename }) => {
            let source = load_or_exit(&filename);
            Lox::new().run(&source)
        }
        Some(Commands::Repl) | None => repl()?,
    };

    info!("Finished with {:?}", status);

    if status != Status::Ok {
        process::exit(status.exit_code());
    }

    Ok(())
}
