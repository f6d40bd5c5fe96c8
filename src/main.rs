use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use upload_client::{
    adapters::{
        console::{spawn_renderer, RenderMode},
        controllers::upload_controller::UploadController,
        error::UserMessage,
        state::ShellState,
    },
    application::services::UploadMachine,
    domain::{
        config::{
            upload::{
                DEFAULT_BASE_URL, DEFAULT_FIELD_NAME, DEFAULT_TIMEOUT_SECS, DEFAULT_UPLOAD_PATH,
            },
            UploadConfig, ValidationRules,
        },
        models::UploadStatus,
    },
    services,
};

/// Upload a single file to the storage backend.
#[derive(Debug, Parser)]
#[command(name = "upload-client", version)]
struct Args {
    /// File to upload
    file: Option<PathBuf>,

    #[arg(long, env = "UPLOAD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "UPLOAD_PATH", default_value = DEFAULT_UPLOAD_PATH)]
    upload_path: String,

    /// Multipart field carrying the file
    #[arg(long, env = "UPLOAD_FIELD_NAME", default_value = DEFAULT_FIELD_NAME)]
    field_name: String,

    #[arg(long, env = "UPLOAD_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Reject files larger than this many bytes
    #[arg(long, env = "UPLOAD_MAX_SIZE")]
    max_size: Option<u64>,

    /// Comma-separated MIME types to accept, `image/*` style wildcards allowed
    #[arg(long, env = "UPLOAD_ALLOWED_TYPES", value_delimiter = ',')]
    allowed_types: Option<Vec<String>>,

    /// Print status updates as JSON lines
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> UploadConfig {
        UploadConfig {
            base_url: self.base_url.clone(),
            upload_path: self.upload_path.clone(),
            field_name: self.field_name.clone(),
            timeout_secs: self.timeout_secs,
            rules: ValidationRules {
                max_size_bytes: self.max_size,
                allowed_types: self.allowed_types.clone(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries status updates.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();

    let client = match services::create_upload_client(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create upload client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let machine = UploadMachine::from_config(&config, client);
    let mode = if args.json {
        RenderMode::Json
    } else {
        RenderMode::Human
    };
    let renderer = spawn_renderer(&machine, mode);
    let state = ShellState::new(config, machine);

    let outcome = run(&state, args.file.as_deref()).await;

    // Dropping the last machine handle closes the event stream.
    drop(state);
    let _ = renderer.await;

    if outcome {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(state: &ShellState, file: Option<&Path>) -> bool {
    if let Err(e) = UploadController::select_path(state, file).await {
        eprintln!("{}", e.user_message());
        return false;
    }

    let status = tokio::select! {
        status = UploadController::submit(state) => status,
        _ = tokio::signal::ctrl_c() => {
            UploadController::cancel(state);
            state.machine.status()
        }
    };

    matches!(status, UploadStatus::Succeeded(_))
}
