use clap::{Parser, ValueEnum};
use coin_terminal::application::machine::{DEFAULT_INITIAL_AMOUNT, PaymentMachine};
use coin_terminal::application::terminal::Terminal;
use coin_terminal::domain::amount::Amount;
use coin_terminal::domain::ports::TicketIssuerBox;
use coin_terminal::infrastructure::issuer::{FixedPriceIssuer, RandomPriceIssuer};
use coin_terminal::interfaces::csv::command_reader::CommandReader;
use coin_terminal::interfaces::csv::stock_writer::StockWriter;
use coin_terminal::interfaces::json::report_writer::ReportWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Final stock as `denomination,count` rows
    Csv,
    /// Full machine report
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file
    input: PathBuf,

    /// Total value of the coins the machine starts with
    #[arg(long, env = "COIN_TERMINAL_INITIAL_AMOUNT", default_value_t = DEFAULT_INITIAL_AMOUNT)]
    initial_amount: i64,

    /// Price of every ticket started without one. Random when omitted.
    #[arg(long)]
    price: Option<i64>,

    /// Seed for random ticket prices
    #[arg(long)]
    seed: Option<u64>,

    /// Output format of the final state
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,
}

/// Logs go to stderr so stdout only carries the report.
/// Set `RUST_LOG` to override the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let machine = PaymentMachine::new(Amount::new(cli.initial_amount)).into_diagnostic()?;
    info!(stock = %machine.stock_total(), "Machine seeded");

    let issuer: TicketIssuerBox = match (cli.price, cli.seed) {
        (Some(price), _) => {
            Box::new(FixedPriceIssuer::new(Amount::new(price)).into_diagnostic()?)
        }
        (None, Some(seed)) => Box::new(RandomPriceIssuer::with_seed(seed)),
        (None, None) => Box::new(RandomPriceIssuer::new()),
    };

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let mut terminal = Terminal::new(machine, issuer);
    let summary = terminal.run(reader.commands());

    for rejection in &summary.rejections {
        eprintln!(
            "Error processing command {}: {}",
            rejection.position, rejection.error
        );
    }
    if summary.out_of_order {
        eprintln!("Machine out of order (no available coins)");
    }

    let mut machine = terminal.into_machine();
    if let Some(ticket) = machine.cancel() {
        eprintln!("Payment for ticket #{} cancelled at end of input", ticket.number);
    }

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Csv => StockWriter::new(stdout.lock())
            .write_stock(machine.stock())
            .into_diagnostic()?,
        OutputFormat::Json => ReportWriter::new(stdout.lock())
            .write_report(&machine.report())
            .into_diagnostic()?,
    }

    Ok(())
}
