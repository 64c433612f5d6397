use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::application::Ledger;

mod shell;
mod words;

pub use shell::{Flow, Shell, ShellOptions};
pub use words::split_words;

/// Grocer - Grocery Inventory & Point of Sale
#[derive(Parser)]
#[command(name = "grocer")]
#[command(about = "Track grocery stock, customers and sales for one session")]
#[command(version)]
pub struct Cli {
    /// Currency label shown after amounts in reports (empty to omit)
    #[arg(short, long, default_value = "birr")]
    pub currency: String,

    /// Merge stock into an existing product without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Read commands from a file instead of the terminal
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// One line typed at the shell prompt.
#[derive(Parser, Debug)]
#[command(name = "grocer", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Catalog management commands
    #[command(subcommand)]
    Product(ProductCommands),

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Sell a product to a customer
    Sell {
        /// Product name (letter case is ignored)
        product: String,

        /// Buyer phone number or name
        buyer: String,

        /// Number of units
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// List recorded sales
    Sales,

    /// Show the revenue report
    Report {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export
        #[arg(value_enum)]
        export_type: ExportType,

        /// Output file (printed here if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportType {
    /// Sale history as CSV
    Sales,
    /// Catalog as CSV
    Products,
    /// Customer list as CSV
    Customers,
    /// Everything as one JSON document
    Full,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Add a product, or add stock to an existing one with the same name
    Add {
        /// Product name (unique, ignoring letter case)
        name: String,

        /// Unit price (e.g. "50" or "12.75")
        #[arg(allow_hyphen_values = true)]
        price: String,

        /// Units in stock
        #[arg(allow_hyphen_values = true)]
        stock: String,

        /// Merge into an existing product without asking
        #[arg(long)]
        merge: bool,
    },

    /// List the catalog
    List,

    /// Add stock to an existing product
    Restock {
        /// Number from `product list`, or product name
        product: String,

        /// Units to add
        #[arg(allow_hyphen_values = true)]
        stock: String,
    },

    /// Remove a product from the catalog
    Delete {
        /// Number from `product list`, or product name
        product: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommands {
    /// Register a customer
    Add {
        /// Customer name
        name: String,

        /// Phone number (must be unique)
        phone: String,
    },

    /// List registered customers
    List,

    /// Remove a customer
    Delete {
        /// Number from `customer list`, phone number, or name
        customer: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let (input, interactive): (Box<dyn BufRead>, bool) = match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script: {}", path.display()))?;
                (Box::new(BufReader::new(file)), false)
            }
            None => {
                let stdin = io::stdin();
                let interactive = stdin.is_terminal();
                (Box::new(stdin.lock()), interactive)
            }
        };

        let options = ShellOptions {
            currency: self.currency,
            auto_confirm: self.yes,
            interactive,
        };

        let stdout = io::stdout();
        let mut shell = Shell::new(Ledger::new(), input, stdout.lock(), options);
        shell.run()?;

        let stats = shell.ledger().stats();
        debug!(
            products = stats.product_count,
            customers = stats.customer_count,
            sales = stats.sale_count,
            "session ended"
        );
        Ok(())
    }
}
