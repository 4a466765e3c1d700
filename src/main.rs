use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;

use crate::{store::QuoteStore, view::QuoteView};

mod commands;
mod constants;
mod error;
mod init;
mod models;
mod storage;
mod store;
mod telemetry;
mod view;

/// everything one run of the program works on.
pub struct Data {
    store: QuoteStore,
    view: QuoteView,
    rng: StdRng,
}

type Error = Box<dyn std::error::Error + Send + Sync>;

/// what a command works on and where it writes to.
///
/// `out` receives quotes and lists. `alerts` receives user-facing failure
/// messages, which are also counted so a one-shot run can exit non-zero.
pub struct Context<'a> {
    data: &'a mut Data,
    out: &'a mut dyn Write,
    alerts: &'a mut dyn Write,
    alert_count: usize,
}

impl<'a> Context<'a> {
    pub fn new(data: &'a mut Data, out: &'a mut dyn Write, alerts: &'a mut dyn Write) -> Self {
        Context {
            data,
            out,
            alerts,
            alert_count: 0,
        }
    }

    pub fn say(&mut self, line: impl std::fmt::Display) -> Result<(), Error> {
        writeln!(self.out, "{line}")
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when writing output"))?;

        Ok(())
    }

    /// writes `text` without a newline, for reading the answer on the same line.
    pub fn prompt(&mut self, text: &str) -> Result<(), Error> {
        write!(self.out, "{text}")
            .and_then(|_| self.out.flush())
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when writing prompt"))?;

        Ok(())
    }

    pub fn alert(&mut self, message: impl std::fmt::Display) -> Result<(), Error> {
        self.alert_count += 1;

        writeln!(self.alerts, "{message}")
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when writing alert"))?;

        Ok(())
    }

    pub fn alert_count(&self) -> usize {
        self.alert_count
    }
}

#[derive(Parser)]
#[command(name = "quotebox")]
#[command(version, about = "Keep a box of quotes and draw one at random", long_about = None)]
struct Cli {
    /// SQLite database holding the quotes (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a random quote from the selected category
    Show,
    /// Add a new quote
    Add {
        /// Quote text
        text: String,
        /// Quote category
        category: String,
    },
    /// List the categories, marking the selected one
    Categories,
    /// Select the category quotes are drawn from ("all" for every category)
    Filter {
        category: String,
    },
    /// Write every quote to a JSON file
    Export {
        /// Output file path
        #[arg(default_value = constants::EXPORT_FILE_NAME)]
        path: PathBuf,
    },
    /// Append the quotes of a JSON file
    Import {
        /// Input file path
        path: PathBuf,
    },
    /// Show version and collection statistics
    Status,
    /// Read commands from stdin until `quit` (default)
    Session,
}

async fn run(ctx: &mut Context<'_>, command: Commands) -> Result<(), Error> {
    match command {
        Commands::Show => commands::quote::show(ctx).await,
        Commands::Add { text, category } => commands::quote::add(ctx, &text, &category).await,
        Commands::Categories => commands::category::categories(ctx),
        Commands::Filter { category } => commands::category::filter(ctx, &category).await,
        Commands::Export { path } => commands::transfer::export(ctx, &path).await,
        Commands::Import { path } => commands::transfer::import(ctx, &path).await,
        Commands::Status => commands::status::status(ctx),
        Commands::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::session::session(ctx, stdin).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let telemetry = telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("failed to initialize telemetry: {e}"))?;

    let mut data = match init::init(cli.database_url).await {
        Ok(data) => data,
        Err(e) => {
            telemetry.shutdown();
            return Err(e);
        }
    };

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let mut ctx = Context::new(&mut data, &mut stdout, &mut stderr);

    let command = cli.command.unwrap_or(Commands::Session);
    let interactive = matches!(command, Commands::Session);

    let result = run(&mut ctx, command).await;
    let alert_count = ctx.alert_count();

    telemetry.shutdown();

    result.map_err(|e| anyhow::anyhow!(e))?;

    // a session reports its failures as it goes
    if !interactive && alert_count > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
