#![allow(clippy::cast_precision_loss)]
//! Command-line driver: argument definitions, solving and reporting.

use anyhow::{Context, bail};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use dp_dpll::sat::cnf::Cnf;
use dp_dpll::sat::dimacs::{parse_file, parse_str};
use dp_dpll::sat::dp::Dp;
use dp_dpll::sat::dpll::Dpll;
use dp_dpll::sat::solver::{
    PureLiteralMode, SolutionStats, Solutions, Solver, SolverOptions, SolverType, Verdict,
};
use dp_dpll::sat::variable_selection::VariableSelectionType;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Defines the command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "dp-dpll",
    version,
    about = "Decide CNF satisfiability with Davis-Putnam or DPLL"
)]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long = "path", id = "file_path")]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// DIMACS input as a string (e.g. "1 -2 0\n2 3 0"). A literal `\n`
        /// is accepted as a line break.
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.cnf` file below a directory.
    Dir {
        /// Directory to scan recursively.
        #[arg(long = "path", id = "dir_path")]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Check a found model against the formula.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the satisfying assignment if one is found.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Print the normalised formula in DIMACS before solving.
    #[arg(long, default_value_t = false)]
    pub(crate) export_dimacs: bool,

    /// The algorithm deciding the formula.
    #[arg(short, long, default_value_t = SolverType::Dpll)]
    pub(crate) solver: SolverType,

    /// Branching-variable policy for DPLL.
    #[arg(long, default_value_t = VariableSelectionType::First)]
    pub(crate) selection: VariableSelectionType,

    /// Seed for the random branching policy.
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,

    /// Apply pure-literal elimination once or to a fixed point.
    #[arg(long, default_value_t = PureLiteralMode::Once)]
    pub(crate) pure_literals: PureLiteralMode,

    /// Give up on DPLL after this many decisions (reported as UNKNOWN).
    #[arg(long)]
    pub(crate) decision_limit: Option<usize>,

    /// Give up on DP once the clause set grows past this size (reported as UNKNOWN).
    #[arg(long)]
    pub(crate) clause_limit: Option<usize>,
}

impl CommonOptions {
    pub(crate) const fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            pure_literals: self.pure_literals,
            selection: self.selection,
            seed: self.seed,
            decision_limit: self.decision_limit,
            clause_limit: self.clause_limit,
        }
    }
}

/// Installs the `tracing` subscriber. Logs go to stderr so reports on stdout
/// stay machine-readable.
pub(crate) fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatches the parsed command line.
///
/// # Errors
///
/// Unreadable or malformed input, and models failing verification.
pub(crate) fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::File { path, common }) => {
            init_logging(common.verbose.max(cli.common.verbose));
            solve_file(&path, &common).map(|_| ())
        }
        Some(Commands::Text { input, common }) => {
            init_logging(common.verbose.max(cli.common.verbose));
            let time = Instant::now();
            let cnf = parse_str(&input.replace("\\n", "\n")).context("failed to parse text input")?;
            solve_and_report(&cnf, &common, None, time.elapsed()).map(|_| ())
        }
        Some(Commands::Dir { path, common }) => {
            init_logging(common.verbose.max(cli.common.verbose));
            solve_dir(&path, &common)
        }
        None => {
            let Some(path) = cli.path else {
                bail!("no input provided, use --help for more information");
            };
            init_logging(cli.common.verbose);
            solve_file(&path, &cli.common).map(|_| ())
        }
    }
}

fn solve_file(path: &Path, common: &CommonOptions) -> anyhow::Result<Verdict> {
    let time = Instant::now();
    let cnf = parse_file(path).with_context(|| format!("failed to parse {}", path.display()))?;
    let parse_time = time.elapsed();
    tracing::info!(path = %path.display(), clauses = cnf.len(), vars = cnf.num_vars, "parsed");

    solve_and_report(&cnf, common, Some(path), parse_time)
}

/// Solves every `.cnf` file below `dir`, one summary line each.
///
/// Files that fail to parse are reported and skipped.
fn solve_dir(dir: &Path, common: &CommonOptions) -> anyhow::Result<()> {
    let mut failures = 0usize;
    let mut solved = 0usize;

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }

        let cnf = match parse_file(path) {
            Ok(cnf) => cnf,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "skipping file");
                failures += 1;
                continue;
            }
        };

        let report = solve(&cnf, common)?;
        if common.verify {
            verify_solution(&cnf, report.solutions.as_ref())?;
        }
        solved += 1;
        println!(
            "{:<40} {:<14} {:>10.3}s  decisions={} conflicts={} eliminations={}",
            path.display(),
            report.verdict.to_string(),
            report.elapsed.as_secs_f64(),
            report.stats.decisions,
            report.stats.conflicts,
            report.stats.eliminations,
        );
    }

    println!("\nSolved {solved} files, {failures} skipped");
    Ok(())
}

/// What one solving run produced.
pub(crate) struct Report {
    pub(crate) verdict: Verdict,
    pub(crate) solutions: Option<Solutions>,
    pub(crate) elapsed: Duration,
    pub(crate) stats: SolutionStats,
}

/// Solves `cnf` with the engine selected in `common`.
///
/// # Errors
///
/// Internal engine errors.
pub(crate) fn solve(cnf: &Cnf, common: &CommonOptions) -> anyhow::Result<Report> {
    let options = common.solver_options();
    let time = Instant::now();

    let (verdict, solutions, stats) = match common.solver {
        SolverType::Dp => run_solver::<Dp>(cnf, options)?,
        SolverType::Dpll => run_solver::<Dpll>(cnf, options)?,
    };

    Ok(Report {
        verdict,
        solutions,
        elapsed: time.elapsed(),
        stats,
    })
}

fn run_solver<S: Solver>(
    cnf: &Cnf,
    options: SolverOptions,
) -> anyhow::Result<(Verdict, Option<Solutions>, SolutionStats)> {
    let mut solver = S::new(cnf.clone(), options);
    let verdict = solver.solve()?;
    Ok((verdict, solver.solutions(), solver.stats()))
}

/// Checks a model against the formula.
///
/// # Errors
///
/// If the model falsifies a clause.
pub(crate) fn verify_solution(cnf: &Cnf, solutions: Option<&Solutions>) -> anyhow::Result<()> {
    if let Some(model) = solutions {
        let ok = cnf.verify(model);
        println!("Verified: {ok}");
        if !ok {
            bail!("solution failed verification");
        }
    }
    Ok(())
}

/// Solves `cnf`, then verifies and prints statistics as configured.
///
/// # Errors
///
/// Internal engine errors and failed verification.
pub(crate) fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> anyhow::Result<Verdict> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }
    if common.export_dimacs {
        println!("{cnf}");
    }

    let report = solve(cnf, common)?;

    if common.verify {
        verify_solution(cnf, report.solutions.as_ref())?;
    }

    if common.stats {
        print_stats(parse_time, cnf, common.solver, &report);
    }

    if common.print_solution {
        if let Some(model) = &report.solutions {
            println!("v {model}");
        }
    }

    println!("\n{}", report.verdict);
    Ok(report.verdict)
}

/// Allocated and resident memory in MiB, if jemalloc can report them.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

fn print_stats(parse_time: Duration, cnf: &Cnf, solver: SolverType, report: &Report) {
    let elapsed_secs = report.elapsed.as_secs_f64();
    let s = &report.stats;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.variables().len());
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals());

    println!("========================[ Search Statistics ]========================");
    stat_line("Solver", solver.to_string());
    match solver {
        SolverType::Dp => {
            stat_line_with_rate("Eliminations", s.eliminations, elapsed_secs);
        }
        SolverType::Dpll => {
            stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
            stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
        }
    }
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
