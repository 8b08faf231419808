//! Eir Command-Line Interface
//!
//! The pipeline entry point: data preparation, circuit display, hybrid
//! training, cloud credentials and the hardware smoke test.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

use commands::{auth, circuits, hw_test, pipeline, prepare, train};

/// Eir - quantum-assisted medical diagnosis demo suite
#[derive(Parser)]
#[command(name = "eir")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare the medical dataset: standardize, reduce, encode, split
    Prepare {
        /// Input CSV in the UCI wdbc.data layout (synthetic corpus if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Number of PCA components (qubits downstream)
        #[arg(short, long, default_value = "8")]
        features: usize,

        /// Test split fraction
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Split seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output archive path
        #[arg(short, long, default_value = "processed_data.json")]
        output: String,
    },

    /// Build and display the quantum circuits
    Circuits {
        /// Number of qubits to display
        #[arg(short, long, default_value = "4")]
        qubits: usize,

        /// Template repetitions
        #[arg(short, long, default_value = "2")]
        reps: usize,
    },

    /// Train the quantum classifier and the classical baseline
    Train {
        /// Input archive from the prepare stage
        #[arg(short, long, default_value = "processed_data.json")]
        data: String,

        /// Maximum optimizer iterations
        #[arg(long, default_value = "100")]
        maxiter: usize,

        /// Output results JSON
        #[arg(short, long, default_value = "quantum_results.json")]
        output: String,

        /// Output text report
        #[arg(long, default_value = "quantum_results.txt")]
        report: String,
    },

    /// Run the complete pipeline: prepare, circuits, train, summary
    Pipeline {
        /// Input CSV (synthetic corpus if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Number of PCA components
        #[arg(short, long, default_value = "8")]
        features: usize,

        /// Quick run (reduced optimizer iterations)
        #[arg(long)]
        quick: bool,
    },

    /// Manage the cloud API credential
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Submit the two-qubit test circuit to cloud hardware
    HwTest {
        /// Number of shots
        #[arg(short, long, default_value = "100")]
        shots: u32,

        /// Give up waiting after this many seconds
        #[arg(long, default_value = "1800")]
        timeout: u64,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Save the cloud API token
    SetToken {
        /// The API token from your provider dashboard
        token: String,
    },

    /// Show credential status
    Status,

    /// Delete the saved credential
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Prepare {
            input,
            features,
            test_size,
            seed,
            output,
        } => prepare::execute(input.as_deref(), features, test_size, seed, &output),
        Commands::Circuits { qubits, reps } => circuits::execute(qubits, reps).await,
        Commands::Train {
            data,
            maxiter,
            output,
            report,
        } => train::execute(&data, maxiter, &output, &report),
        Commands::Pipeline {
            input,
            features,
            quick,
        } => pipeline::execute(input.as_deref(), features, quick).await,
        Commands::Auth { action } => match action {
            AuthAction::SetToken { token } => auth::set_token(&token),
            AuthAction::Status => auth::status(),
            AuthAction::Clear => auth::clear(),
        },
        Commands::HwTest { shots, timeout } => hw_test::execute(shots, timeout).await,
    }
}
