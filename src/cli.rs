use eobills::services::extract::{
    DEFAULT_DESCRIPTION, DEFAULT_KEY, DEFAULT_OUT, DEFAULT_SHEET, DEFAULT_TITLE,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "eobills",
    version,
    about = "State bills linked to executive orders"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Data source holding the order index and bill sheets (dir or http(s) base url)"
    )]
    pub data: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List executive orders, newest first
    Orders,
    /// Ingest an order's bill sheet and list its bills
    Bills {
        order: String,
        #[arg(long, help = "Only this state (code or full name)")]
        state: Option<String>,
        #[arg(long, help = "Match bill number, name or AI summary")]
        query: Option<String>,
    },
    /// Per-state position tallies and action-date ages for an order
    Stats {
        order: String,
        #[arg(long, help = "Reference date (YYYY-MM-DD), defaults to today")]
        today: Option<String>,
    },
    /// Static party-control table
    Party,
    /// Canonicalize a state name or code
    Resolve { raw: String },
    /// Precompute the bill mapping artifact from a local bill sheet
    Extract {
        #[arg(long, default_value = DEFAULT_SHEET)]
        sheet: String,
        #[arg(long, default_value = DEFAULT_OUT)]
        out: String,
        #[arg(long, default_value = DEFAULT_KEY)]
        key: String,
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,
        #[arg(long, default_value = DEFAULT_DESCRIPTION)]
        description: String,
    },
    /// Sponsor details for a bill from BillTrack50
    Sponsors { bill_id: String },
}
