//! # Denpyo CLI
//!
//! Command-line interface for composing and printing receipts.
//!
//! ## Usage
//!
//! ```bash
//! # Show the composed text for a request file
//! denpyo compose receipt.json
//!
//! # Read the request from stdin, compose for an 80mm printer
//! cat slip.json | denpyo compose - --profile tsp650ii
//!
//! # Print, filling an empty timestamp with the current time
//! denpyo print receipt.json --device /dev/rfcomm0 --stamp-time
//!
//! # List printer profiles
//! denpyo profiles
//!
//! # Run the HTTP API
//! denpyo serve --listen 0.0.0.0:8080 --device /dev/rfcomm0
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `denpyo=info`); stdout carries
//! only the composed document.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use denpyo::{
    DenpyoError, ErrorKind,
    adapter,
    json_api::PrintRequest,
    printer::PrinterConfig,
    server::{self, ServerConfig},
    transport::{DEFAULT_DEVICE, DeviceSink},
};

/// Format used by `--stamp-time`.
const STAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Denpyo - receipt and order slip printer utility
#[derive(Parser, Debug)]
#[command(name = "denpyo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose a request and write the text to stdout
    Compose {
        /// Request JSON file, or `-` for stdin
        input: PathBuf,

        /// Printer profile (id, name, or column count)
        #[arg(long, default_value = "mp-b20")]
        profile: String,

        /// Fill an empty timestamp with the current local time
        #[arg(long)]
        stamp_time: bool,
    },

    /// Compose a request and send it to the printer
    Print {
        /// Request JSON file, or `-` for stdin
        input: PathBuf,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// Printer profile (id, name, or column count)
        #[arg(long, default_value = "mp-b20")]
        profile: String,

        /// Fill an empty timestamp with the current local time
        #[arg(long)]
        stamp_time: bool,
    },

    /// List built-in printer profiles
    Profiles,

    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// Printer profile (id, name, or column count)
        #[arg(long, default_value = "mp-b20")]
        profile: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "denpyo=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run() -> Result<(), DenpyoError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compose {
            input,
            profile,
            stamp_time,
        } => {
            let config = PrinterConfig::by_name(&profile)?;
            let request = read_request(&input, stamp_time)?;
            let composition = adapter::compose_request(&request, &config)?;

            print!("{}", composition.document.text());
            for diagnostic in &composition.diagnostics {
                eprintln!("warning: {}", diagnostic);
            }
        }

        Commands::Print {
            input,
            device,
            profile,
            stamp_time,
        } => {
            let config = PrinterConfig::by_name(&profile)?;
            let request = read_request(&input, stamp_time)?;

            // Compose before opening the device so bad requests never touch it
            let composition = adapter::compose_request(&request, &config)?;
            let mut sink = DeviceSink::open(&device)?;
            adapter::deliver(&composition.document, &mut sink)?;

            for diagnostic in &composition.diagnostics {
                eprintln!("warning: {}", diagnostic);
            }
            println!(
                "Printed {} ({} lines) to {}",
                composition.document.kind().label(),
                composition.document.lines().len(),
                device
            );
        }

        Commands::Profiles => {
            println!("Available profiles:");
            for config in PrinterConfig::built_in() {
                println!(
                    "  {:<10} {:<14} {} columns ({}mm)",
                    config.id,
                    config.name,
                    config.columns(),
                    config.width_mm().round()
                );
            }
        }

        Commands::Serve {
            listen,
            device,
            profile,
        } => {
            let config = ServerConfig {
                device_path: device,
                listen_addr: listen,
                profile: PrinterConfig::by_name(&profile)?,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}

/// Read a tagged request from a file or stdin.
fn read_request(input: &Path, stamp_time: bool) -> Result<PrintRequest, DenpyoError> {
    let json = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };

    let mut request = PrintRequest::from_json(&json)?;
    if stamp_time {
        let now = chrono::Local::now().format(STAMP_FORMAT).to_string();
        match &mut request {
            PrintRequest::Receipt(r) if r.timestamp.is_empty() => r.timestamp = now,
            PrintRequest::OrderSlip(s) if s.timestamp.is_empty() => s.timestamp = now,
            _ => {}
        }
    }
    Ok(request)
}

fn exit_code(e: &DenpyoError) -> i32 {
    if matches!(e, DenpyoError::Io(_)) {
        return 1;
    }
    match e.kind() {
        ErrorKind::Validation | ErrorKind::ItemParse => 2,
        ErrorKind::Configuration => 3,
        ErrorKind::Output => 4,
    }
}
