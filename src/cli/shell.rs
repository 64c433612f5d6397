use std::fs::File;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use tracing::debug;

use crate::application::{
    AddProductOutcome, ErrorKind, Ledger, LedgerError, ProductForm, parse_sale_quantity,
};
use crate::domain::{Amount, CustomerId, ProductId, format_amount, parse_stock};
use crate::io::Exporter;

use super::{Commands, CustomerCommands, ExportType, ProductCommands, ShellLine, split_words};

/// Session settings taken from the command line.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub currency: String,
    /// Merge stock into existing products without asking
    pub auto_confirm: bool,
    /// Show a prompt and ask questions on the input stream
    pub interactive: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            currency: "birr".to_string(),
            auto_confirm: false,
            interactive: false,
        }
    }
}

/// Whether the session continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end for a [`Ledger`].
///
/// Reads one command per line, calls into the ledger and prints the result.
/// A failed command prints a message and the session carries on.
pub struct Shell<R, W> {
    ledger: Ledger,
    input: R,
    out: W,
    options: ShellOptions,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ledger: Ledger, input: R, out: W, options: ShellOptions) -> Self {
        Self {
            ledger,
            input,
            out,
            options,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn into_parts(self) -> (Ledger, W) {
        (self.ledger, self.out)
    }

    /// Process commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        if self.options.interactive {
            writeln!(
                self.out,
                "grocer {} - type 'help' for commands, 'quit' to leave",
                env!("CARGO_PKG_VERSION")
            )?;
        }

        loop {
            if self.options.interactive {
                write!(self.out, "grocer> ")?;
                self.out.flush()?;
            }

            let Some(line) = self.read_line()? else {
                break;
            };
            if self.execute_line(&line)? == Flow::Quit {
                break;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Execute a single line. Only failures writing output are returned as errors.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(err) => {
                writeln!(self.out, "Error: {}", err)?;
                return Ok(Flow::Continue);
            }
        };

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) => {
                if !matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelp
                        | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    debug!(line, "unrecognized command");
                }
                write!(self.out, "{}", err)?;
                return Ok(Flow::Continue);
            }
        };

        match self.execute(parsed.command) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                self.report_error(&err)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: Commands) -> Result<Flow> {
        match command {
            Commands::Product(cmd) => self.run_product_command(cmd)?,
            Commands::Customer(cmd) => self.run_customer_command(cmd)?,
            Commands::Sell {
                product,
                buyer,
                quantity,
            } => self.run_sell_command(&product, &buyer, &quantity)?,
            Commands::Sales => self.run_sales_command()?,
            Commands::Report { format } => self.run_report_command(&format)?,
            Commands::Export {
                export_type,
                output,
            } => self.run_export_command(export_type, output.as_deref())?,
            Commands::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report_error(&mut self, err: &anyhow::Error) -> Result<()> {
        debug!(error = %err, "command failed");
        match err.downcast_ref::<LedgerError>() {
            Some(LedgerError::EmptyField(field)) => {
                writeln!(self.out, "Fill all fields! ('{}' is empty)", field)?
            }
            Some(ledger_err) => {
                let headline = match ledger_err.kind() {
                    ErrorKind::Validation => "Invalid input",
                    ErrorKind::Conflict => "Already registered",
                    ErrorKind::NotFound => "Not found",
                    ErrorKind::InsufficientStock => "Not enough stock",
                };
                writeln!(self.out, "{}: {}", headline, ledger_err)?
            }
            None => writeln!(self.out, "Error: {:#}", err)?,
        }
        Ok(())
    }

    // ========================
    // Products
    // ========================

    fn run_product_command(&mut self, cmd: ProductCommands) -> Result<()> {
        match cmd {
            ProductCommands::Add {
                name,
                price,
                stock,
                merge,
            } => {
                let new = ProductForm::new(name, price, stock).parse()?;
                match self.ledger.try_add_product(&new.name, new.price, new.stock)? {
                    AddProductOutcome::Created(product) => {
                        let price = self.money(product.price);
                        writeln!(
                            self.out,
                            "Added product: {} ({} in stock at {})",
                            product.name, product.stock, price
                        )?;
                    }
                    AddProductOutcome::Duplicate { existing } => {
                        let question = format!("Product '{}' exists. Add stock?", existing.name);
                        if merge || self.options.auto_confirm || self.confirm(&question)? {
                            let product = self.ledger.merge_stock(existing.id, new.stock)?;
                            writeln!(
                                self.out,
                                "Added {} units to {} (stock now {})",
                                new.stock, product.name, product.stock
                            )?;
                        } else {
                            writeln!(self.out, "Product '{}' unchanged", existing.name)?;
                        }
                    }
                }
            }

            ProductCommands::List => {
                let products = self.ledger.products();
                if products.is_empty() {
                    writeln!(self.out, "No products found.")?;
                } else {
                    writeln!(self.out, "{:<4} {:<24} {:>12} {:>8}", "#", "NAME", "PRICE", "STOCK")?;
                    writeln!(self.out, "{}", "-".repeat(51))?;
                    for (i, product) in products.iter().enumerate() {
                        writeln!(
                            self.out,
                            "{:<4} {:<24} {:>12} {:>8}",
                            i + 1,
                            product.name,
                            format_amount(product.price),
                            product.stock
                        )?;
                    }
                }
            }

            ProductCommands::Restock { product, stock } => {
                let id = self.select_product(&product)?;
                let added =
                    parse_stock(&stock).map_err(|e| LedgerError::from_parse("stock", &stock, e))?;
                let product = self.ledger.merge_stock(id, added)?;
                writeln!(
                    self.out,
                    "Added {} units to {} (stock now {})",
                    added, product.name, product.stock
                )?;
            }

            ProductCommands::Delete { product } => {
                let id = self.select_product(&product)?;
                let removed = self.ledger.delete_product(id)?;
                writeln!(self.out, "Deleted product: {}", removed.name)?;
            }
        }
        Ok(())
    }

    /// Resolve a product name or a listing number (1-based). An exact name wins.
    fn select_product(&self, selection: &str) -> Result<ProductId> {
        if let Some(product) = self.ledger.find_product(selection) {
            return Ok(product.id);
        }
        if let Ok(number) = selection.trim().parse::<usize>() {
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow!("Listing numbers start at 1"))?;
            return Ok(self.ledger.product_at(index)?.id);
        }
        Err(LedgerError::ProductNotFound(selection.trim().to_string()).into())
    }

    // ========================
    // Customers
    // ========================

    fn run_customer_command(&mut self, cmd: CustomerCommands) -> Result<()> {
        match cmd {
            CustomerCommands::Add { name, phone } => {
                let customer = self.ledger.add_customer(&name, &phone)?;
                writeln!(
                    self.out,
                    "Added customer: {} ({})",
                    customer.name, customer.phone
                )?;
            }

            CustomerCommands::List => {
                let customers = self.ledger.customers();
                if customers.is_empty() {
                    writeln!(self.out, "No customers found.")?;
                } else {
                    writeln!(self.out, "{:<4} {:<24} {:<16}", "#", "NAME", "PHONE")?;
                    writeln!(self.out, "{}", "-".repeat(44))?;
                    for (i, customer) in customers.iter().enumerate() {
                        writeln!(
                            self.out,
                            "{:<4} {:<24} {:<16}",
                            i + 1,
                            customer.name,
                            customer.phone
                        )?;
                    }
                }
            }

            CustomerCommands::Delete { customer } => {
                let id = self.select_customer(&customer)?;
                let removed = self.ledger.delete_customer(id)?;
                writeln!(
                    self.out,
                    "Deleted customer: {} ({})",
                    removed.name, removed.phone
                )?;
            }
        }
        Ok(())
    }

    /// Resolve a listing number (1-based), a phone number or a customer name.
    fn select_customer(&self, selection: &str) -> Result<CustomerId> {
        if let Some(customer) = self.ledger.find_customer(selection) {
            if customer.has_phone(selection.trim()) {
                return Ok(customer.id);
            }
        }
        if let Ok(number) = selection.trim().parse::<usize>() {
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow!("Listing numbers start at 1"))?;
            return Ok(self.ledger.customer_at(index)?.id);
        }
        let customer = self
            .ledger
            .find_customer(selection)
            .ok_or_else(|| LedgerError::CustomerNotFound(selection.trim().to_string()))?;
        Ok(customer.id)
    }

    // ========================
    // Sales and reports
    // ========================

    fn run_sell_command(&mut self, product: &str, buyer: &str, quantity: &str) -> Result<()> {
        let quantity = parse_sale_quantity(quantity)?;
        let sale = self.ledger.record_sale_by_name(product, buyer, quantity)?;

        let left = self
            .ledger
            .find_product(&sale.product_name)
            .map_or(0, |p| p.stock);
        let total = self.money(sale.total);
        writeln!(
            self.out,
            "Sold {} x {} to {} = {} ({} left)",
            sale.quantity, sale.product_name, sale.buyer_name, total, left
        )?;
        Ok(())
    }

    fn run_sales_command(&mut self) -> Result<()> {
        let sales = self.ledger.sales();
        if sales.is_empty() {
            writeln!(self.out, "No sales recorded.")?;
            return Ok(());
        }

        writeln!(
            self.out,
            "{:<20} {:<24} {:>6} {:>12} {:<20}",
            "TIME", "PRODUCT", "QTY", "TOTAL", "BUYER"
        )?;
        writeln!(self.out, "{}", "-".repeat(86))?;
        for sale in sales {
            writeln!(
                self.out,
                "{:<20} {:<24} {:>6} {:>12} {:<20}",
                sale.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                sale.product_name,
                sale.quantity,
                format_amount(sale.total),
                sale.buyer_name
            )?;
        }
        Ok(())
    }

    fn run_report_command(&mut self, format: &str) -> Result<()> {
        let report = self.ledger.compute_report();
        match format {
            "table" => {
                writeln!(self.out, "{}", report.render(&self.options.currency))?;
            }
            "json" => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(&report)?)?;
            }
            "csv" => {
                let mut csv_writer = csv::Writer::from_writer(&mut self.out);
                csv_writer.write_record(["buyer", "quantity", "product", "total"])?;
                for line in &report.lines {
                    csv_writer.write_record([
                        line.buyer.clone(),
                        line.quantity.to_string(),
                        line.product.clone(),
                        format_amount(line.total),
                    ])?;
                }
                csv_writer.write_record([
                    "overall_revenue".to_string(),
                    String::new(),
                    String::new(),
                    format_amount(report.overall_revenue),
                ])?;
                csv_writer.flush()?;
            }
            _ => bail!(
                "Invalid report format '{}'. Valid formats: table, json, csv",
                format
            ),
        }
        Ok(())
    }

    fn run_export_command(
        &mut self,
        export_type: ExportType,
        output: Option<&std::path::Path>,
    ) -> Result<()> {
        let exporter = Exporter::new(&self.ledger);

        let writer: Box<dyn Write + '_> = match output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(file)
            }
            None => Box::new(&mut self.out),
        };

        let summary = match export_type {
            ExportType::Sales => format!("{} sales", exporter.export_sales_csv(writer)?),
            ExportType::Products => format!("{} products", exporter.export_products_csv(writer)?),
            ExportType::Customers => {
                format!("{} customers", exporter.export_customers_csv(writer)?)
            }
            ExportType::Full => {
                let snapshot = exporter.export_full_json(writer)?;
                format!(
                    "full ledger: {} products, {} customers, {} sales",
                    snapshot.products.len(),
                    snapshot.customers.len(),
                    snapshot.sales.len()
                )
            }
        };

        match output {
            Some(path) => writeln!(self.out, "Exported {} to {}", summary, path.display())?,
            // JSON has no trailing newline of its own
            None if export_type == ExportType::Full => writeln!(self.out)?,
            None => {}
        }
        Ok(())
    }

    // ========================
    // Helpers
    // ========================

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Ask a yes/no question. Without a terminal the answer is always no.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if !self.options.interactive {
            writeln!(
                self.out,
                "{} Skipped: pass --merge or start with --yes to confirm",
                question
            )?;
            return Ok(false);
        }

        write!(self.out, "{} [y/N] ", question)?;
        self.out.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn money(&self, amount: Amount) -> String {
        if self.options.currency.is_empty() {
            format_amount(amount)
        } else {
            format!("{} {}", format_amount(amount), self.options.currency)
        }
    }
}
