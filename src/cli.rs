// src/cli.rs
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ Args, Parser, Subcommand };

use crate::config::consts::{ API_KEY_ENV, DATA_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_FACT_LIMIT, PAGE_SIZE, STORE_SEP };
use crate::config::{ Config, RowLimit };
use crate::csv::rows_to_string;
use crate::data::{ Selection, SelectionView, RAW_VIEW_HEADERS };
use crate::error::PipelineError;
use crate::progress::Progress;
use crate::runner;

#[derive(Parser, Debug)]
#[command(name = "seoul_market", version)]
#[command(about = "Collect, join and summarise Seoul commercial-district store counts", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Seoul open-data API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true, global = true)]
    pub key: Option<String>,

    /// Directory holding the CSV artifacts
    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,

    /// Rows requested per API call
    #[arg(long, default_value_t = PAGE_SIZE, global = true)]
    pub page_size: usize,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Suppress the live row counter
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Dashboard arguments. Reads the same data directory as the CLI.
#[derive(Parser, Debug)]
#[command(name = "seoul_market", version, about = "Dashboard over the joined store counts")]
pub struct GuiArgs {
    /// Directory holding the CSV artifacts
    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct LimitArgs {
    /// Stop requesting once at least this many rows are collected (0 = all)
    #[arg(long, default_value_t = DEFAULT_FACT_LIMIT, conflicts_with = "all")]
    pub limit: usize,

    /// Collect every available row
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch store counts into the fact file
    Collect(LimitArgs),
    /// Join the fact file with district metadata into the final file
    Preprocess,
    /// Collect, then preprocess
    Run(LimitArgs),
    /// Summarise the final file for one industry
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Industry name (exact match); defaults to the first coffee industry
    #[arg(long, short)]
    pub industry: Option<String>,

    /// Administrative district to include (repeatable; none = all)
    #[arg(long = "district", short)]
    pub districts: Vec<String>,

    /// Print matching rows as CSV after the summary
    #[arg(long)]
    pub raw: bool,

    /// List industries and districts, then exit
    #[arg(long)]
    pub list: bool,
}

impl CommonArgs {
    pub fn config(&self, limit: Option<LimitArgs>) -> Config {
        let mut config = Config::default().with_data_dir(&self.data_dir);
        config.api_key = self.key.clone();
        config.api.page_size = self.page_size.max(1);
        config.api.timeout = self.timeout.map(Duration::from_secs);
        if let Some(l) = limit {
            config.fact_limit = if l.all { RowLimit::Unbounded } else { RowLimit::from_option(Some(l.limit)) };
        }
        config
    }
}

/// Row counter on stderr.
struct CliProgress {
    target: Option<usize>,
}

impl Progress for CliProgress {
    fn begin(&mut self, target: Option<usize>) {
        self.target = target;
    }
    fn page_done(&mut self, _start: usize, fetched: usize) {
        match self.target {
            Some(t) => eprint!("\rFetched {fetched}/{t} rows"),
            None => eprint!("\rFetched {fetched} rows"),
        }
        let _ = std::io::stderr().flush();
    }
    fn finish(&mut self, fetched: usize) {
        if fetched > 0 { eprintln!(); }
    }
}

pub fn run() -> Result<(), PipelineError> {
    let cli = Cli::parse();
    execute(cli)
}

pub fn execute(cli: Cli) -> Result<(), PipelineError> {
    let mut progress = CliProgress { target: None };
    let progress: Option<&mut dyn Progress> = if cli.common.quiet { None } else { Some(&mut progress) };

    match cli.command {
        Command::Collect(limit) => {
            runner::collect(&cli.common.config(Some(limit)), progress).map(|_| ())
        }
        Command::Preprocess => runner::preprocess(&cli.common.config(None)).map(|_| ()),
        Command::Run(limit) => runner::run_all(&cli.common.config(Some(limit)), progress).map(|_| ()),
        Command::View(args) => view(&cli.common.config(None), &args),
    }
}

fn view(config: &Config, args: &ViewArgs) -> Result<(), PipelineError> {
    let raw = runner::load_final(config)?;

    if args.list {
        println!("Industries:");
        for i in raw.industries() { println!("  {i}"); }
        println!("Districts:");
        for d in raw.districts() { println!("  {d}"); }
        return Ok(());
    }

    let Some(industry) = args.industry.clone().or_else(|| raw.default_industry()) else {
        println!("The final table has no rows.");
        return Ok(());
    };
    let districts: BTreeSet<String> = args.districts.iter().cloned().collect();
    let view = SelectionView::from_raw(&raw, Selection::new(&industry, &districts));

    print!("{}", render_summary(&industry, &view));

    if args.raw && !view.is_empty() {
        let headers: Vec<String> = RAW_VIEW_HEADERS.iter().map(|h| s!(*h)).collect();
        print!("\n{}", rows_to_string(&headers, &view.display_rows(), STORE_SEP));
    }
    Ok(())
}

/// Plain-text dashboard: KPIs then the per-district comparison.
pub fn render_summary(industry: &str, view: &SelectionView<'_>) -> String {
    let t = view.totals();
    let mut out = format!("'{industry}' commercial districts\n");
    out.push_str(&format!("Total stores: {}\nOpened: {}\nClosed: {}\n\n", t.stores, t.opened, t.closed));

    let groups = view.by_district();
    if groups.is_empty() {
        out.push_str("No data matches the selected filters.\n");
        return out;
    }

    let width = groups.iter().map(|g| g.signgu.chars().count()).max().unwrap_or(0).max(8);
    out.push_str(&format!("{:<width$}  {:>8}  {:>8}\n", "District", "Opened", "Closed"));
    for g in &groups {
        let pad = width - g.signgu.chars().count();
        out.push_str(&format!("{}{}  {:>8}  {:>8}\n", g.signgu, " ".repeat(pad), g.opened, g.closed));
    }
    out
}
