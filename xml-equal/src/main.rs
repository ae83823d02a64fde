use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xml_equal::config::{load_config, Config};
use xml_equal::inspect::render_tree;
use xml_equal::normalize::{normalize, normalize_into};
use xml_equal::report::{render_trace, render_verdict, CompareReport};
use xml_equal_core::{compare, parse_file};

mod cli;

use cli::{Cli, Command, CompareArgs, InspectArgs, NormalizeArgs, OutputFormat};

/// Exit status when the compared documents differ.
const EXIT_DIFFERENT: u8 = 1;
/// Exit status for parse, I/O and usage errors.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let trace = matches!(&cli.command, Command::Compare(args) if args.trace);
    init_logging(&cli.log_level, trace);

    let result = match cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Inspect(args) => run_inspect(args).map(|()| ExitCode::SUCCESS),
        Command::Normalize(args) => run_normalize(args).map(|()| ExitCode::SUCCESS),
    };

    result.unwrap_or_else(|err| {
        eprintln!("Error: {err:?}");
        ExitCode::from(EXIT_ERROR)
    })
}

fn init_logging(directive: &str, trace: bool) {
    let mut filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    if trace {
        if let Ok(trace_directive) = "xml_equal::trace=debug".parse() {
            filter = filter.add_directive(trace_directive);
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run_compare(args: CompareArgs) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let opts = args.resolve_options(&config.compare);
    debug!(?opts, "resolved comparison options");

    let left = parse_file(&args.file1)
        .with_context(|| format!("failed to parse {}", args.file1.display()))?;
    let right = parse_file(&args.file2)
        .with_context(|| format!("failed to parse {}", args.file2.display()))?;

    let comparison = compare(&left, &right, &opts)?;
    info!(
        left = %args.file1.display(),
        right = %args.file2.display(),
        equal = comparison.equal,
        "comparison finished"
    );

    if !args.quiet {
        match args.format {
            OutputFormat::Text => {
                if opts.trace {
                    println!("{}", render_trace(&comparison.trace));
                    println!();
                }
                println!("{}", render_verdict(&comparison));
            }
            OutputFormat::Json => {
                let report = CompareReport {
                    left: args.file1.display().to_string(),
                    right: args.file2.display().to_string(),
                    ignore_whitespace: opts.ignore_whitespace,
                    equal: comparison.equal,
                    first_mismatch: comparison.first_mismatch(),
                    trace: &comparison.trace,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
    }

    if comparison.equal {
        return Ok(ExitCode::SUCCESS);
    }
    if !args.quiet {
        eprintln!(
            "documents differ: {} and {}",
            args.file1.display(),
            args.file2.display()
        );
    }
    Ok(ExitCode::from(EXIT_DIFFERENT))
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let node = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    print!("{}", render_tree(&node, args.depth));
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    let pretty = !args.compact;

    if let Some(out_path) = args.output {
        return normalize_into(&args.file, &out_path, pretty);
    }

    let bytes = normalize(&args.file, pretty)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&bytes)?;
    writeln!(stdout)?;
    Ok(())
}
