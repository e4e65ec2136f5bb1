use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "marketbrief",
    about = "Summarize today's market data and headlines and publish the brief"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print the run report as JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect quotes and headlines, summarize once, publish one page/message
    Run {
        /// Destination (notion, discord). Defaults to MARKETBRIEF_TARGET
        #[arg(long)]
        target: Option<String>,
        /// Summarize but do not publish
        #[arg(long)]
        dry_run: bool,
        /// Leave the quote section out
        #[arg(long)]
        no_quotes: bool,
        /// Leave the headline section out
        #[arg(long)]
        no_headlines: bool,
    },
    /// Summarize each feed entry and post it with its link
    News {
        /// Destination (notion, discord)
        #[arg(long, default_value = "discord")]
        target: String,
        /// Number of entries to post (defaults to MARKETBRIEF_HEADLINE_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
        /// Summarize but do not publish
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the collected document without calling the model
    Collect {
        #[arg(long)]
        no_quotes: bool,
        #[arg(long)]
        no_headlines: bool,
    },
}
