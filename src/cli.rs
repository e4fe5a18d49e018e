// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::file::ConfigFile;
use crate::config::options::{AppOptions, ExportFormat};
use crate::core::{HttpSource, SleepPacer};
use crate::progress::LogProgress;
use crate::scrape::{self, Session};

/// Scrape bilateral investment treaties (BITs) and treaties with investment
/// provisions (TIPs) from the UNCTAD IIA Navigator.
#[derive(Debug, Parser)]
#[command(name = "iia_scrape", version, about)]
pub struct Args {
    /// Limit to the first N countries (0 = all)
    #[arg(long, value_name = "N")]
    pub max_countries: Option<usize>,

    /// Output file (default: data/treaties.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Resume from the last checkpoint
    #[arg(long)]
    pub resume: bool,

    /// Don't write the JSON copy next to the output
    #[arg(long)]
    pub no_json: bool,

    /// Leave out the header row
    #[arg(long)]
    pub no_headers: bool,

    /// Don't visit detail pages of terminated treaties
    #[arg(long)]
    pub skip_enrichment: bool,

    /// Checkpoint and log directory (default: data)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: ./iia_scrape.toml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Discover the country list, print it as `id,slug,name` and exit
    #[arg(long)]
    pub list_countries: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

/// Defaults, then the config file, then flags.
pub fn resolve_options(args: &Args) -> Result<AppOptions> {
    let mut opts = AppOptions::default();
    if let Some(cfg) = ConfigFile::load(args.config.as_deref())? {
        cfg.apply(&mut opts);
    }

    if let Some(n) = args.max_countries {
        opts.scrape.max_countries = (n > 0).then_some(n);
    }
    if let Some(dir) = &args.data_dir {
        opts.scrape.data_dir = dir.clone();
    }
    opts.scrape.resume = args.resume;
    opts.scrape.skip_enrichment |= args.skip_enrichment;

    if let Some(out) = &args.output {
        opts.export.out_path = out.clone();
    }
    if let Some(f) = args.format {
        opts.export.set_format(f.into());
    }
    if args.no_json {
        opts.export.write_json = false;
    }
    if args.no_headers {
        opts.export.include_headers = false;
    }
    Ok(opts)
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let opts = resolve_options(&args)?;

    crate::log::init(args.verbose, Some(&opts.scrape.log_path()))
        .wrap_err("could not open log file")?;

    let mut source = HttpSource::new(&opts.scrape.net)?;
    let mut pacer = SleepPacer;

    if args.list_countries {
        let mut session = Session { source: &mut source, pacer: &mut pacer, opts: &opts.scrape };
        for c in scrape::discover_countries(&mut session)? {
            println!("{},{},{}", c.id, c.slug, c.name);
        }
        return Ok(());
    }

    let mut progress = LogProgress::new();
    let summary = scrape::run(&opts, &mut source, &mut pacer, &mut progress)
        .wrap_err("scrape failed")?;

    println!(
        "{} countries, {} rows, {} unique treaties ({} terminated, {} with termination type)",
        summary.countries, summary.raw_rows, summary.unique, summary.terminated, summary.enriched
    );
    for p in &summary.files_written {
        println!("Wrote {}", p.display());
    }
    if !summary.failed_countries.is_empty() {
        println!(
            "{} countries failed; rerun with --resume to retry them",
            summary.failed_countries.len()
        );
    }
    Ok(())
}
