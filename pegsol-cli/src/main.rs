mod utils;

use crate::utils::{print_bench, print_report, print_run, with_spinner};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pegsol_common::layout::Layout;
use pegsol_solver::{DEFAULT_MAX_NODES, SolveReport, solve};

use std::io::{Read, stdin};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board down to a single peg on the target cell
    Solve {
        /// Built-in board shape
        #[arg(short, long, value_enum, default_value_t = Shape::English)]
        layout: Shape,
        /// Max search nodes before giving up
        #[arg(short, long, default_value_t = DEFAULT_MAX_NODES, value_name = "NUM")]
        max_nodes: u32,
        /// Preview the start board without solving
        #[arg(short, long)]
        preview: bool,
        /// Path to a board file (`-` reads stdin); overrides --layout
        file: Option<PathBuf>,
    },
    /// Time the solver over repeated runs
    Bench {
        /// Built-in board shape
        #[arg(short, long, value_enum, default_value_t = Shape::English)]
        layout: Shape,
        /// Number of timed runs
        #[arg(short, long, default_value_t = 10, value_name = "NUM")]
        runs: u32,
        /// Max search nodes per run
        #[arg(short, long, default_value_t = DEFAULT_MAX_NODES, value_name = "NUM")]
        max_nodes: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    /// 7×7 cross, 32 pegs
    English,
    /// 9×9 cross, 44 pegs
    German,
}

impl Shape {
    fn layout(self) -> Layout {
        match self {
            Shape::English => Layout::english(),
            Shape::German => Layout::german(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            layout,
            max_nodes,
            preview,
            file,
        } => {
            let layout = load_layout(file, layout)?;
            if preview {
                println!("{}", layout.board().pretty_print());
                println!("\nTarget: {}", layout.target());
                return Ok(());
            }
            println!("{}\n", layout.board().pretty_print());
            let report: SolveReport =
                with_spinner("Searching for a solution...", || solve(&layout, max_nodes));
            let code = print_report(&report);
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Bench {
            layout,
            runs,
            max_nodes,
        } => {
            let layout = layout.layout();
            let reports: Vec<SolveReport> = (1..=runs)
                .map(|run| {
                    let report = solve(&layout, max_nodes);
                    print_run(run, &report);
                    report
                })
                .collect();
            print_bench(&reports);
        }
    }

    Ok(())
}

fn load_layout(file: Option<PathBuf>, shape: Shape) -> Result<Layout> {
    let Some(file) = file else {
        return Ok(shape.layout());
    };
    let content = if file.to_str() == Some("-") {
        let mut content = String::new();
        stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        content
    } else {
        std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };
    Layout::parse(&content).context("Failed to parse board")
}
