mod commands;

use clap::{Parser, Subcommand};
use efax_core::{FileType, Priority, Resolution, SelfBusy};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "efax", version, about = "Send and track faxes through eFax Developer")]
struct Cli {
    /// Override the service endpoint
    #[arg(long, env = "EFAX_URL", global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a file as an outbound fax
    Send {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long)]
        fax: String,
        #[arg(long, default_value = "")]
        subject: String,
        /// File type tag; guessed from the file extension when omitted
        #[arg(long = "type")]
        file_type: Option<FileType>,
        file: PathBuf,
    },
    /// Poll the delivery status of a submitted fax
    Status { doc_id: String },
    /// Parse an inbound notification document
    Inbound {
        xml_file: PathBuf,
        /// Write the decoded fax document here
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Update the stored account settings
    Configure {
        #[arg(long)]
        account_id: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        resolution: Option<Resolution>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        self_busy: Option<SelfBusy>,
    },
    /// Store the account password in the OS keychain
    SetPassword { password: String },
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Send {
            name,
            company,
            fax,
            subject,
            file_type,
            file,
        } => {
            let req = commands::SendRequest {
                name,
                company,
                fax,
                subject,
                file_type,
                file,
            };
            commands::send(cli.endpoint, req).await
        }
        Command::Status { doc_id } => commands::status(cli.endpoint, doc_id).await,
        Command::Inbound { xml_file, save } => commands::inbound(xml_file, save).await,
        Command::Configure {
            account_id,
            username,
            resolution,
            priority,
            self_busy,
        } => commands::configure(commands::Settings {
            account_id,
            username,
            resolution,
            priority,
            self_busy,
        }),
        Command::SetPassword { password } => commands::set_password(&password),
    }
}
