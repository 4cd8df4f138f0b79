use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-snapshot",
    about = "Record license-relevant dependency metadata as a deterministic snapshot",
    version
)]
pub struct Cli {
    /// Project path
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Build description to read scopes from [default: auto-detect dependency-graph.json, gradle.lockfile, pom.xml]
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Config file [default: ./.license-snapshot/config.toml, fallback ~/.config/license-snapshot/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Snapshot output path (overrides config)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Local Maven-layout repository (overrides config)
    #[arg(long, value_name = "DIR")]
    pub repository: Option<PathBuf>,

    /// Fetch missing descriptors from the remote repository first
    #[arg(long)]
    pub online: bool,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// List every snapshot record and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
