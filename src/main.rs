use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use breach_solver::{
    BreachProtocol, BreachProtocolRawData, HierarchyConfig, SearchStrategy, SolverOptions,
};
use clap::Parser;
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

#[derive(Parser)]
#[command(name = "breach-solve")]
#[command(about = "Solve a breach protocol puzzle and print the moves as JSON")]
struct Cmd {
    /// Puzzle JSON (`grid`, `daemons`, `bufferSize`, optional `types`); `-` reads stdin
    input: PathBuf,

    /// Solver options JSON; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search strategy: bfs or dfs
    #[arg(long)]
    strategy: Option<SearchStrategy>,

    /// Rank daemons by type, least important first
    #[arg(long, value_delimiter = ',')]
    types: Option<Vec<String>>,

    /// Always prefer the daemon with this index
    #[arg(long)]
    focus: Option<usize>,

    /// Number of solutions to print, best first
    #[arg(long, default_value_t = 1)]
    limit: usize,

    /// Check the puzzle before solving it
    #[arg(long)]
    validate: bool,

    /// More logging on stderr; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cmd = Cmd::parse();
    init_logging(cmd.verbose);

    let data = read_puzzle(&cmd.input)?;
    if cmd.validate {
        data.validate().context("invalid puzzle")?;
    }
    let options = options(&cmd)?;
    tracing::info!(
        size = data.size(),
        daemons = data.daemons.len(),
        buffer_size = data.buffer_size,
        strategy = %options.strategy,
        "solving"
    );

    let protocol = BreachProtocol::new(&data, options);
    let results: Vec<_> = protocol.solve_all().take(cmd.limit).collect();
    if results.is_empty() {
        tracing::warn!("no daemon can be solved");
    }
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(if results.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_puzzle(input: &Path) -> Result<BreachProtocolRawData> {
    let text = if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading puzzle from stdin")?;
        text
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    };
    serde_json::from_str(&text).context("parsing puzzle")
}

fn options(cmd: &Cmd) -> Result<SolverOptions> {
    let mut options = match &cmd.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).context("parsing solver options")?
        }
        None => SolverOptions::default(),
    };
    if let Some(strategy) = cmd.strategy {
        options.strategy = strategy;
    }
    if let Some(priority) = &cmd.types {
        options.hierarchy = HierarchyConfig::Types {
            priority: priority.clone(),
        };
    }
    if let Some(index) = cmd.focus {
        options.hierarchy = HierarchyConfig::Focus {
            index,
            inner: Box::new(options.hierarchy),
        };
    }
    Ok(options)
}
