//! Legend CLI - drive the access gate from a terminal
//!
//! Runs the same Session Gate the site uses, backed by a JSON file instead of
//! browser storage:
//! - `status` mounts the gate and reports what a page load would render
//! - `sign-in` submits the capture form
//! - `sign-out` forgets the stored visitor
//! - `config` prints the effective configuration

use clap::{Parser, Subcommand};
use legend_gate::{GateView, SessionGate, Submission};
use legend_gate_store::JsonFileBackend;
use legend_gate_types::{CaptureMode, Route};
use std::ffi::OsString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod config;
mod error;

pub use adapters::{ConsoleNavigator, TracingSink};
pub use config::CliConfig;
pub use error::{CliError, CliResult};

type CliGate = SessionGate<JsonFileBackend, TracingSink, ConsoleNavigator>;

/// Legend CLI application
#[derive(Parser)]
#[command(name = "legend")]
#[command(about = "Legend - access gate for the architecture map", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "LEGEND_CONFIG")]
    config: Option<String>,

    /// Identity file (overrides the config file)
    #[arg(short, long, env = "LEGEND_STORE")]
    store: Option<String>,

    /// Require a name as well as an email (sign-in page behaviour)
    #[arg(long)]
    require_name: bool,

    /// Route to forward authenticated visitors to
    #[arg(long)]
    next_route: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Show what a page load would render
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit the capture form
    #[command(alias = "login")]
    SignIn {
        /// Visitor email
        #[arg(short, long)]
        email: String,

        /// Visitor name
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Forget the stored visitor
    #[command(alias = "logout")]
    SignOut,

    /// Show configuration
    Config,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    // Load config
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store_path = Some(store.into());
    }
    if cli.require_name {
        config.gate.capture = CaptureMode::NameAndEmail;
    }
    if let Some(route) = cli.next_route {
        config.gate.next_route = Some(Route::new(route));
    }

    let store_path = config.store_path()?;
    let mut gate: CliGate = SessionGate::new(
        config.gate.clone(),
        JsonFileBackend::new(&store_path),
        TracingSink,
        ConsoleNavigator,
    );

    // Execute command
    match cli.command {
        Commands::Status { json } => status(&mut gate, json),
        Commands::SignIn { email, name } => sign_in(&mut gate, email, name),
        Commands::SignOut => {
            gate.sign_out()?;
            println!("Signed out");
            Ok(())
        }
        Commands::Config => {
            println!("Store: {}", store_path.display());
            println!("Config: {:?}", config);
            Ok(())
        }
    }
}

fn status(gate: &mut CliGate, json: bool) -> CliResult<()> {
    gate.mount();

    if json {
        let body = serde_json::json!({
            "state": gate.state().label(),
            "identity": gate.identity(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    match gate.view() {
        GateView::Protected(identity) => println!("✓ Authenticated as {identity}"),
        GateView::CaptureForm(form) if form.requires_name() => {
            println!("✗ Sign-in required (name and email)")
        }
        GateView::CaptureForm(_) => println!("✗ Sign-in required (email)"),
        GateView::Pending => println!("… Gate not evaluated"),
    }
    Ok(())
}

fn sign_in(gate: &mut CliGate, email: String, name: String) -> CliResult<()> {
    gate.mount();

    if let Some(identity) = gate.identity() {
        println!("Already signed in as {identity}");
        return Ok(());
    }

    if let Some(form) = gate.form_mut() {
        form.set_email(email);
        form.set_name(name);
    }

    match gate.submit()? {
        Submission::Accepted(identity) => {
            println!("✓ Signed in as {identity}");
            Ok(())
        }
        Submission::Ignored(reason) => Err(CliError::InvalidInput(reason.to_string())),
        Submission::NotPersisted(e) => Err(e.into()),
    }
}
