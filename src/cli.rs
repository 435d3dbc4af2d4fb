//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use clicha_core::NormalizationMode;

/// Score news corpora for climate-change awareness.
///
/// Builds an IDF model from a reference corpus, derives a climate keyword
/// list, and turns yearly article corpora into per-article and per-year
/// Climate Awareness Index (CAI) reports.
#[derive(Parser, Debug)]
#[command(name = "clicha")]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand. Unset values fall back to the config
/// file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Term normalization: lower (fast) or lemma (slow, more accurate)
    #[arg(short = 'n', long, global = true)]
    pub normalization: Option<NormalizationMode>,

    /// Maximum years processed concurrently (1-100)
    #[arg(short = 'c', long, global = true, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: Option<u8>,

    /// Articles normalized per batch (1-10000)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    pub chunk_size: Option<u64>,
}

/// Inclusive range of years.
#[derive(Args, Debug, Clone)]
pub struct YearRange {
    /// First year to process
    #[arg(long = "from")]
    pub from: u16,

    /// Last year to process (inclusive)
    #[arg(long = "to")]
    pub to: u16,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the IDF model from a reference corpus
    Idf(IdfArgs),
    /// Rank candidate keywords from domain corpora against the IDF model
    Discover(DiscoverArgs),
    /// Turn a candidate report into the final keyword list
    Curate(CurateArgs),
    /// Score yearly corpora and write per-year match reports
    Score(ScoreArgs),
    /// Summarize per-year match reports into a yearly summary report
    Summarize(SummarizeArgs),
    /// Score a single text or corpus file and print each article's CAI
    Cai(CaiArgs),
    /// Compare two yearly summary reports
    Compare(CompareArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

#[derive(Args, Debug)]
pub struct IdfArgs {
    /// Reference corpus file
    pub corpus: PathBuf,

    /// Where to write the IDF model
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Domain corpus files (e.g. un.txt nasa.txt)
    #[arg(required = true)]
    pub corpora: Vec<PathBuf>,

    /// IDF model built from the reference corpus
    #[arg(long)]
    pub idf: PathBuf,

    /// Where to write the candidate report
    #[arg(short, long)]
    pub output: PathBuf,

    /// Keep terms found in strictly more documents than this
    #[arg(long)]
    pub min_documents: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CurateArgs {
    /// Candidate report produced by `discover`
    pub candidates: PathBuf,

    /// Curation rules file (defaults to the bundled rules)
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Where to write the keyword list
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Directory holding one `<year>.txt` corpus per year
    pub dataset_dir: PathBuf,

    #[command(flatten)]
    pub years: YearRange,

    /// IDF model built from the reference corpus
    #[arg(long)]
    pub idf: PathBuf,

    /// Keyword list
    #[arg(long)]
    pub keywords: PathBuf,

    /// Directory receiving one `<year>.txt` match report per year
    #[arg(long)]
    pub report_dir: PathBuf,

    /// Also write the yearly summary report here
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Articles collected per year
    #[arg(long)]
    pub articles_per_year: Option<usize>,

    /// Print one JSON object per line instead of CSV
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Directory holding one `<year>.txt` match report per year
    pub report_dir: PathBuf,

    #[command(flatten)]
    pub years: YearRange,

    /// Where to write the yearly summary report
    #[arg(short, long)]
    pub output: PathBuf,

    /// Articles collected per year
    #[arg(long)]
    pub articles_per_year: Option<usize>,

    /// Print one JSON object per line instead of CSV
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CaiArgs {
    /// Text to score; reads stdin when neither TEXT nor --file is given
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Corpus file whose articles are scored one by one
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// IDF model built from the reference corpus
    #[arg(long)]
    pub idf: PathBuf,

    /// Keyword list
    #[arg(long)]
    pub keywords: PathBuf,

    /// Print one JSON object per line instead of CSV
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Summary report of the first dataset
    pub first: PathBuf,

    /// Summary report of the second dataset
    pub second: PathBuf,

    /// Print one JSON object per line instead of CSV
    #[arg(long)]
    pub json: bool,
}
