//! tern: parse TypeScript and JavaScript files and report syntax errors.
//!
//! Usage:
//!   tern parse [options] <file...>
//!   tern edit <file> --start N --delete N --insert TEXT [--verify]
//!
//! Logging goes to stderr and is enabled with `TERN_LOG` (or `RUST_LOG`),
//! e.g. `TERN_LOG=tern_parser=debug`.

mod error;
mod input;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use rayon::prelude::*;
use tern_parser::{
    parse_source_file, parse_source_file_with_scanner, update_source_file, ParseOptions, ScriptKind, SourceFile,
    SourceType,
};
use tern_scanner::Scanner;
use tracing::{debug, info};

use crate::error::{CliError, Result};
use crate::report::FileDump;

/// Parser threads recurse on nested syntax; give them room.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

#[derive(ClapParser, Debug)]
#[command(name = "tern", version, about = "tern - an error-tolerant TypeScript parser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse files and print their syntax errors.
    Parse {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,

        /// Parse on this many threads (defaults to the number of cores).
        #[arg(short = 'j', long)]
        jobs: Option<usize>,
    },

    /// Apply one text edit to a file and update its tree incrementally.
    Edit {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Char offset of the edit.
        #[arg(long)]
        start: usize,

        /// Chars removed at `start`.
        #[arg(long, default_value_t = 0)]
        delete: usize,

        /// Text inserted at `start`.
        #[arg(long, default_value = "")]
        insert: String,

        /// Fail unless the updated tree matches a full parse of the new text.
        #[arg(long)]
        verify: bool,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OptionArgs {
    /// JSON file with parse options.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the script kind derived from the file extension.
    #[arg(long = "script-kind", value_enum)]
    script_kind: Option<ScriptKindArg>,

    /// Parse as an ES module.
    #[arg(long)]
    module: bool,

    /// Print the syntax tree as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Diagnostics shown per file.
    #[arg(long = "max-diagnostics", default_value_t = 20)]
    max_diagnostics: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScriptKindArg {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl From<ScriptKindArg> for ScriptKind {
    fn from(arg: ScriptKindArg) -> Self {
        match arg {
            ScriptKindArg::Js => ScriptKind::JS,
            ScriptKindArg::Jsx => ScriptKind::JSX,
            ScriptKindArg::Ts => ScriptKind::TS,
            ScriptKindArg::Tsx => ScriptKind::TSX,
        }
    }
}

impl OptionArgs {
    fn parse_options(&self) -> Result<ParseOptions> {
        let mut options = input::load_options(self.config.as_deref())?;
        if let Some(kind) = self.script_kind {
            options = options.with_script_kind(kind.into());
        }
        if self.module {
            options = options.with_source_type(SourceType::Module);
        }
        Ok(options)
    }
}

fn main() -> miette::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();
    let code = match cli.command {
        Command::Parse { files, options, jobs } => run_parse(&files, &options, jobs)?,
        Command::Edit { file, start, delete, insert, verify, options } => {
            run_edit(&file, start, delete, &insert, verify, &options)?
        }
    };
    Ok(code)
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("TERN_LOG").or_else(|_| EnvFilter::try_from_default_env());
    if let Ok(filter) = filter {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    }
}

fn run_parse(paths: &[PathBuf], args: &OptionArgs, jobs: Option<usize>) -> Result<ExitCode> {
    if paths.is_empty() {
        return Err(CliError::NoInput);
    }
    let start = Instant::now();
    let options = args.parse_options()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .stack_size(WORKER_STACK_SIZE)
        .build()?;
    debug!(threads = pool.current_num_threads(), files = paths.len(), "parsing");

    let files = pool.install(|| {
        paths
            .par_iter()
            .map_init(Scanner::default, |scanner, path| {
                let text = input::read_source(path)?;
                let (file, reused) =
                    parse_source_file_with_scanner(std::mem::take(scanner), &display_name(path), &text, options);
                *scanner = reused;
                Ok(file)
            })
            .collect::<Result<Vec<SourceFile>>>()
    })?;

    emit(&files, args)?;

    let diagnostics: usize = files.iter().map(|file| file.diagnostics.len()).sum();
    let nodes: usize = files.iter().map(|file| file.node_count).sum();
    info!(files = files.len(), nodes, diagnostics, "parsed");
    eprintln!(
        "Parsed {} file{} in {:.2}s: {} syntax error{}.",
        files.len(),
        plural(files.len()),
        start.elapsed().as_secs_f64(),
        diagnostics,
        plural(diagnostics)
    );
    Ok(exit_code(&files))
}

fn run_edit(path: &Path, start: usize, delete: usize, insert: &str, verify: bool, args: &OptionArgs) -> Result<ExitCode> {
    let options = args.parse_options()?;
    let name = display_name(path);
    let text = input::read_source(path)?;
    let original = parse_source_file(&name, &text, options);
    let (new_text, change) = input::apply_edit(path, &text, start, delete, insert)?;

    let began = Instant::now();
    let updated = update_source_file(&original, &new_text, change, options).into_owned();
    let elapsed = began.elapsed();
    info!(
        reused = updated.reused_node_count,
        nodes = updated.node_count,
        micros = elapsed.as_micros() as u64,
        "updated"
    );

    if verify {
        let fresh = parse_source_file(&name, &new_text, options);
        if updated.flatten() != fresh.flatten() || updated.diagnostics != fresh.diagnostics {
            return Err(CliError::VerifyMismatch { path: path.to_path_buf() });
        }
        debug!("incremental tree matches a full parse");
    }

    let files = [updated];
    emit(&files, args)?;
    eprintln!(
        "Updated {} in {:.2}ms: reused {} of {} nodes, {} syntax error{}.",
        name,
        elapsed.as_secs_f64() * 1000.0,
        files[0].reused_node_count,
        files[0].node_count,
        files[0].diagnostics.len(),
        plural(files[0].diagnostics.len())
    );
    Ok(exit_code(&files))
}

/// Diagnostics go to stderr; `--json` also writes the trees to stdout.
fn emit(files: &[SourceFile], args: &OptionArgs) -> Result<()> {
    for file in files {
        report::print_diagnostics(file, args.max_diagnostics);
    }
    if args.json {
        let dumps: Vec<FileDump> = files.iter().map(FileDump::new).collect();
        println!("{}", serde_json::to_string_pretty(&dumps)?);
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn exit_code(files: &[SourceFile]) -> ExitCode {
    ExitCode::from(exit_status(files))
}

/// 2 when any file has syntax errors, as with a failed compile.
fn exit_status(files: &[SourceFile]) -> u8 {
    if files.iter().any(SourceFile::has_errors) {
        2
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["tern", "parse", "a.ts", "b.tsx", "--script-kind", "tsx", "--module", "-j", "2"])
            .unwrap();
        let Command::Parse { files, options, jobs } = cli.command else {
            panic!("expected the parse command");
        };
        assert_eq!(files, vec![PathBuf::from("a.ts"), PathBuf::from("b.tsx")]);
        assert_eq!(jobs, Some(2));
        let options = options.parse_options().unwrap();
        assert_eq!(options.script_kind, ScriptKind::TSX);
        assert_eq!(options.source_type, SourceType::Module);
    }

    #[test]
    fn test_edit_flags() {
        let cli = Cli::try_parse_from(["tern", "edit", "a.ts", "--start", "3", "--insert", "x", "--verify"]).unwrap();
        let Command::Edit { start, delete, insert, verify, .. } = cli.command else {
            panic!("expected the edit command");
        };
        assert_eq!((start, delete, insert.as_str(), verify), (3, 0, "x", true));
    }

    #[test]
    fn test_parse_requires_files() {
        assert!(Cli::try_parse_from(["tern", "parse"]).is_err());
    }

    #[test]
    fn test_exit_code_follows_errors() {
        let clean = parse_source_file("a.ts", "let x = 1;", ParseOptions::default());
        let broken = parse_source_file("b.ts", "let x = ;", ParseOptions::default());
        assert_eq!(exit_status(&[clean.clone()]), 0);
        assert_eq!(exit_status(&[clean, broken]), 2);
    }
}
