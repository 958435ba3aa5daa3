//! Library side of the `scour` command.
//!
//! Argument parsing, input loading and pipeline assembly live here so they can
//! be tested without spawning the binary.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use scour_common::ScourError;
use scour_common::warning::warn_once;
use scour_text::{Pipeline, PipelineConfig, PipelineStats, Step};

/// scour: escape markup-significant characters and strip tags
#[derive(Parser, Debug)]
#[command(name = "scour")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Escape a file for embedding in HTML
    scour notes.txt

    # Strip tags, then escape, reading stdin
    echo '<b>Tom & Jerry</b>' | scour -s strip-tags -s encode

    # Turn newlines into line breaks
    scour --text $'one\ntwo' -s encode-with-breaks

    # Load steps from a JSON config and report what was removed
    scour -c pipeline.json --stats page.html
"#)]
pub struct Cli {
    /// File to read (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Process this text instead of a file or stdin
    #[arg(long, value_name = "TEXT", conflicts_with = "path")]
    pub text: Option<String>,

    /// Step to run; repeat to chain (strip-tags, encode, encode-with-breaks)
    #[arg(short = 's', long = "step", value_name = "STEP", value_parser = Step::parse)]
    pub steps: Vec<Step>,

    /// JSON pipeline config; --step flags replace its steps
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print input/output sizes and stripped characters to stderr
    #[arg(long)]
    pub stats: bool,

    /// Suppress warnings
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// What one run did, for `--stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Characters read.
    pub input_chars: usize,
    /// Characters written.
    pub output_chars: usize,
    /// Counters from the pipeline.
    pub pipeline: PipelineStats,
}

/// Read a JSON pipeline config from `path`.
///
/// # Errors
///
/// Returns [`ScourError::Io`] if the file cannot be read and
/// [`ScourError::Config`] if it is not a valid config.
pub fn load_config(path: &Path) -> scour_common::Result<PipelineConfig> {
    let json = fs::read_to_string(path).map_err(|e| ScourError::io(path, e))?;
    PipelineConfig::from_json_named(&json, &path.display().to_string())
}

/// Decode raw input bytes, naming `origin` if they are not UTF-8.
///
/// # Errors
///
/// Returns [`ScourError::InvalidUtf8`] for non-UTF-8 input.
pub fn decode_input(bytes: Vec<u8>, origin: &str) -> scour_common::Result<String> {
    String::from_utf8(bytes).map_err(|_| ScourError::InvalidUtf8 {
        path: origin.to_string(),
    })
}

impl Cli {
    /// Assemble the pipeline from `--config` and `--step`.
    ///
    /// # Errors
    ///
    /// Fails if the config file cannot be loaded.
    pub fn pipeline(&self) -> scour_common::Result<Pipeline> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => PipelineConfig::default(),
        };
        if !self.steps.is_empty() {
            config.steps.clone_from(&self.steps);
        }
        Ok(config.into_pipeline())
    }

    /// Load the text to process from `--text`, the file argument, or `stdin`.
    ///
    /// # Errors
    ///
    /// Fails if the file or stdin cannot be read, or is not UTF-8.
    pub fn input(&self, mut stdin: impl Read) -> scour_common::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.path {
            let bytes = fs::read(path).map_err(|e| ScourError::io(path, e))?;
            return decode_input(bytes, &path.display().to_string());
        }
        let mut bytes = Vec::new();
        let _ = stdin.read_to_end(&mut bytes).map_err(ScourError::Stdin)?;
        decode_input(bytes, "-")
    }

    /// Run the command, writing the sanitized text to `out`.
    ///
    /// # Errors
    ///
    /// Fails on config or input errors, or if writing to `out` fails.
    pub fn run(&self, stdin: impl Read, out: &mut impl Write) -> anyhow::Result<Summary> {
        let pipeline = self.pipeline().context("could not build pipeline")?;
        let input = self.input(stdin).context("could not read input")?;

        if input.is_empty() {
            warn_once("cli", "input is empty");
        }

        let (output, stats) = pipeline.apply_with_stats(&input);
        if stats.unterminated {
            warn_once(
                "strip",
                "unterminated tag: everything from the unclosed '<' onward was dropped",
            );
        }

        out.write_all(output.as_bytes())
            .context("could not write output")?;
        out.flush().context("could not write output")?;

        Ok(Summary {
            input_chars: input.chars().count(),
            output_chars: output.chars().count(),
            pipeline: stats,
        })
    }
}

/// Print a `--stats` report to stderr.
pub fn print_summary(summary: &Summary) {
    eprintln!("{}", "=== scour ===".bold());
    eprintln!("{:>10} {}", "input".cyan(), summary.input_chars);
    eprintln!("{:>10} {}", "output".cyan(), summary.output_chars);
    eprintln!("{:>10} {}", "stripped".cyan(), summary.pipeline.dropped);
    eprintln!("{:>10} {}", "changed".cyan(), summary.pipeline.steps_changed);
    if summary.pipeline.unterminated {
        eprintln!("{:>10} input ended inside a tag", "note".yellow());
    }
}
