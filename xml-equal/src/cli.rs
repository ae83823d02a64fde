use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use xml_equal_core::CompareOptions;

#[derive(Parser, Debug)]
#[command(name = "xml-equal")]
#[command(about = "Check whether two XML documents carry the same data")]
pub struct Cli {
    /// Log filter directive (for example `warn` or `xml_equal=debug`).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare two XML files and report whether they are equal.
    Compare(CompareArgs),
    /// Show parsed structure of a single XML file.
    Inspect(InspectArgs),
    /// Re-serialize an XML file in a canonical layout.
    Normalize(NormalizeArgs),
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    pub file1: PathBuf,
    pub file2: PathBuf,
    /// Whitespace handling; overrides the config file when given.
    #[arg(long, value_enum)]
    pub whitespace: Option<WhitespaceMode>,
    /// Print every comparison step.
    #[arg(long)]
    pub trace: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print nothing; report the verdict through the exit status only.
    #[arg(short, long)]
    pub quiet: bool,
    /// Optional TOML file with a `[compare]` table of default options.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CompareArgs {
    /// Apply command-line flags on top of configured defaults.
    pub fn resolve_options(&self, defaults: &CompareOptions) -> CompareOptions {
        let mut opts = *defaults;
        if let Some(mode) = self.whitespace {
            opts.ignore_whitespace = mode == WhitespaceMode::Ignore;
        }
        if self.trace {
            opts.trace = true;
        }
        opts
    }
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    pub file: PathBuf,
    /// Write to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Emit without indentation.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum WhitespaceMode {
    /// Drop whitespace-only text and trim text before comparing.
    Ignore,
    /// Treat every whitespace character as content.
    Keep,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use xml_equal_core::CompareOptions;

    use super::{Cli, Command};

    fn resolve(args: &[&str], defaults: CompareOptions) -> CompareOptions {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        match cli.command {
            Command::Compare(compare) => compare.resolve_options(&defaults),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn whitespace_flag_overrides_config_in_both_directions() {
        let keep = resolve(
            &["xml-equal", "compare", "a.xml", "b.xml", "--whitespace", "keep"],
            CompareOptions::default(),
        );
        assert!(!keep.ignore_whitespace);

        let ignore = resolve(
            &["xml-equal", "compare", "a.xml", "b.xml", "--whitespace", "ignore"],
            CompareOptions::strict(),
        );
        assert!(ignore.ignore_whitespace);
    }

    #[test]
    fn config_applies_when_no_flag_is_given() {
        let opts = resolve(
            &["xml-equal", "compare", "a.xml", "b.xml"],
            CompareOptions::strict().with_trace(true),
        );
        assert!(!opts.ignore_whitespace);
        assert!(opts.trace);
    }
}
