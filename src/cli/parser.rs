use crate::core::export::ExportFormat;
use crate::sheet::SheetShape;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rFuelImport
/// CLI application to import irregular fuel-report workbooks into SQLite
#[derive(Parser)]
#[command(
    name = "rfuelimport",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import weekly and daily generator fuel reports into operating sessions stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the configuration in effect")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Import a fuel-report workbook (.xlsx, .xls, .ods or .csv)
    Import {
        /// Workbook to import
        file: String,

        #[arg(
            long = "range",
            help = "Accepted session dates: YYYY, YYYY-MM, YYYY-MM-DD or start:end"
        )]
        range: String,

        #[arg(long = "layout", value_enum, default_value = "keyed", help = "Sheet layout")]
        layout: SheetShape,

        #[arg(long = "sheet", help = "Worksheet name (default: first sheet)")]
        sheet: Option<String>,

        #[arg(long = "rate", help = "Cost per liter (overrides cost_per_liter)")]
        rate: Option<f64>,

        #[arg(long = "company", help = "Company label (overrides company)")]
        company: Option<String>,

        #[arg(
            long = "keep-existing",
            help = "Do not delete stored sessions in the range before importing"
        )]
        keep_existing: bool,

        #[arg(long = "dry-run", help = "Parse and print, without writing to the database")]
        dry_run: bool,
    },

    /// Show how the rows of a workbook are classified
    Inspect {
        /// Workbook to inspect
        file: String,

        #[arg(long = "layout", value_enum, default_value = "keyed", help = "Sheet layout")]
        layout: SheetShape,

        #[arg(long = "sheet", help = "Worksheet name (default: first sheet)")]
        sheet: Option<String>,

        #[arg(long = "range", help = "Mark data rows inside/outside this range")]
        range: Option<String>,

        #[arg(long = "rows", default_value_t = 50, help = "Number of rows to show")]
        rows: usize,
    },

    /// List stored sessions
    List {
        #[arg(long = "range", help = "YYYY, YYYY-MM, YYYY-MM-DD or start:end (default: all)")]
        range: Option<String>,

        #[arg(long = "branch", help = "Only this site")]
        branch: Option<String>,
    },

    /// Export stored sessions
    Export {
        #[arg(long = "format", value_enum, default_value = "csv", help = "Output format")]
        format: ExportFormat,

        #[arg(long = "file", help = "Output file path")]
        file: String,

        #[arg(long = "range", help = "YYYY, YYYY-MM, YYYY-MM-DD or start:end (default: all)")]
        range: Option<String>,

        #[arg(long = "branch", help = "Only this site")]
        branch: Option<String>,

        #[arg(long = "force", help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
