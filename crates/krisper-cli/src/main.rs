// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! KRISPER command-line front end.
//!
//! Usage: `krisper <compile|plain|parse|lower|introns> [TEXT]... [--file FILE]`
//!
//! Input is the joined TEXT arguments, the contents of FILE, or stdin when
//! neither is given. JSON goes to stdout; logs go to stderr and are filtered
//! with `RUST_LOG`.

mod error;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use error::{CliError, Result};
use krisper::{CompilerOptions, ErrorEnvelope, KrisperCompiler};
use poetica_lower::LowerOptions;
use poetica_parser::ParseOptions;

#[derive(Parser, Debug)]
#[command(name = "krisper")]
#[command(about = "Compile constrained natural language into KRISPER IR")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a command string into an operation plan
    Compile {
        #[command(flatten)]
        input: Input,

        /// Seed for compress entries without `using seed=<n>`
        #[arg(long)]
        seed: Option<u64>,

        /// Codec named in compress params
        #[arg(long)]
        codec: Option<String>,

        /// Fail when the plan references undefined outputs
        #[arg(long)]
        strict: bool,
    },

    /// Compile plain-speak lines into a step list
    Plain {
        #[command(flatten)]
        input: Input,
    },

    /// Parse a Bio_Poetica poem into its statement tree
    Parse {
        #[command(flatten)]
        input: Input,

        /// Upper bound for line scores
        #[arg(long = "score-cap")]
        score_cap: Option<u8>,
    },

    /// Parse and lower a Bio_Poetica poem into a gene document
    Lower {
        #[command(flatten)]
        input: Input,

        /// Name of the synthesized default gene
        #[arg(long = "default-gene")]
        default_gene: Option<String>,

        /// Command attached to the synthesized default gene
        #[arg(long = "default-cmd")]
        default_cmd: Option<String>,
    },

    /// Whitespace statistics of a poem
    Introns {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// Source text; joined with spaces
    text: Vec<String>,

    /// Read source text from a file
    #[arg(long, short = 'f', conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl Input {
    fn read(&self) -> Result<String> {
        if let Some(path) = &self.file {
            info!("Reading {}", path.display());
            return Ok(fs::read_to_string(path)?);
        }
        if !self.text.is_empty() {
            return Ok(self.text.join(" "));
        }
        Ok(io::read_to_string(io::stdin())?)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,krisper=info,krisper_cli=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Compile {
            input,
            seed,
            codec,
            strict,
        } => {
            let defaults = CompilerOptions::default();
            let compiler = KrisperCompiler::new(CompilerOptions {
                codec: codec.unwrap_or(defaults.codec),
                default_seed: seed.unwrap_or(defaults.default_seed),
                ..defaults
            });

            let plan = match compiler.compile(&input.read()?) {
                Ok(plan) => plan,
                Err(err) => {
                    print_json(&ErrorEnvelope {
                        error: err.to_string(),
                    })?;
                    return Err(err.into());
                }
            };

            let dangling = plan.dangling_refs();
            for dangling_ref in &dangling {
                warn!(
                    "Entry {} input `{}` references undefined `{}`",
                    dangling_ref.entry, dangling_ref.input, dangling_ref.reference
                );
            }
            print_json(&plan)?;
            if strict && !dangling.is_empty() {
                return Err(CliError::DanglingRefs(dangling.len()));
            }
            info!("Compiled {} plan entries", plan.len());
        }
        Commands::Plain { input } => {
            let program = krisper::plain::compile_lines(&input.read()?);
            print_json(&program)?;
        }
        Commands::Parse { input, score_cap } => {
            let defaults = ParseOptions::default();
            let options = ParseOptions {
                score_cap: score_cap.unwrap_or(defaults.score_cap),
            };
            let program = poetica_parser::parse_with_options(&input.read()?, options);
            print_json(&program)?;
        }
        Commands::Lower {
            input,
            default_gene,
            default_cmd,
        } => {
            let defaults = LowerOptions::default();
            let options = LowerOptions {
                default_gene_name: default_gene.unwrap_or(defaults.default_gene_name),
                default_gene_cmd: default_cmd.or(defaults.default_gene_cmd),
            };
            let program = poetica_parser::parse(&input.read()?);
            let document = poetica_lower::lower_with_options(&program, &options);
            info!(
                "Lowered {} statements into {} genes",
                program.statements.len(),
                document.genes.len()
            );
            print_json(&document)?;
        }
        Commands::Introns { input } => {
            print_json(&poetica_parser::intron_profile(&input.read()?))?;
        }
    }
    Ok(())
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compile_flags() {
        let cli = Cli::parse_from([
            "krisper", "compile", "compress", "payload", "'a'", "--seed", "7", "--strict",
        ]);
        let Commands::Compile {
            input, seed, strict, ..
        } = cli.command
        else {
            panic!("expected compile");
        };
        assert_eq!(input.read().unwrap(), "compress payload 'a'");
        assert_eq!(seed, Some(7));
        assert!(strict);
    }

    #[test]
    fn test_file_conflicts_with_text() {
        let result = Cli::try_parse_from(["krisper", "parse", "emit", "--file", "poem.bp"]);
        assert!(result.is_err());
    }
}
