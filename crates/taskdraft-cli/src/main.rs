use std::path::PathBuf;

use clap::Parser;
use taskdraft_cli::config::{AppConfig, API_KEY_VAR};
use taskdraft_cli::console::{Console, Prompted, StdioConsole};
use taskdraft_cli::prompts::system_prompt;
use taskdraft_cli::repl::Repl;
use taskdraft_cli::setup::establish_session;
use taskdraft_ingest::Ingestor;
use taskdraft_llm::{CompletionClient, ModelConfig};
use taskdraft_session::{ConversationSession, ExportCatalog, SessionSnapshot, SnapshotStore};
use tracing_subscriber::EnvFilter;

const BAR: &str = "============================================================";

#[derive(Parser)]
#[command(
    name = "taskdraft",
    about = "TaskDraft — a chat assistant for drafting task descriptions"
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "taskdraft.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    // One catch-all at the process boundary: recoverable errors never reach
    // here, so anything that does is reported generically and exits non-zero.
    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("\n❌ Unexpected error: {e}");
            eprintln!("Please contact the program developer for assistance.");
            1
        }
    };
    std::process::exit(code);
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut console = StdioConsole;

    console.line(&format!("\n{BAR}"));
    console.line("          TASKDRAFT — TASK DESCRIPTION ASSISTANT");
    console.line(BAR);

    let config = match AppConfig::load_or_init(&cli.config, &mut console)? {
        Prompted::Value(config) => config,
        Prompted::Exit => {
            console.line("\nGoodbye!");
            return Ok(());
        }
    };

    let Some(api_key) = config.resolve_api_key() else {
        eprintln!("\n❌ ERROR: {API_KEY_VAR} not configured!");
        eprintln!("Add your API key to the environment or a .env file.");
        eprintln!("Get a key from: https://console.groq.com");
        std::process::exit(1);
    };
    let model = ModelConfig {
        api_key,
        ..config.model.clone()
    };

    let ingestor = Ingestor::with_builtin_readers();
    let snapshots = SnapshotStore::new(config.save_folder_path.join("saved_session.json"));
    let catalog = ExportCatalog::new(config.save_folder_path.join("exports.json"));

    let context = match establish_session(&mut console, &ingestor, &snapshots)? {
        Prompted::Value(context) => context,
        Prompted::Exit => {
            console.line("\nGoodbye!");
            return Ok(());
        }
    };

    // Persist the resume point before the first chat turn, so an interrupted
    // first turn still leaves the setup answers behind.
    let snapshot = SessionSnapshot::now(context.role, &context.repository, context.file.clone());
    if let Err(e) = snapshots.save(&snapshot) {
        console.line(&format!("❌ Could not save the session snapshot: {e}"));
        tracing::warn!(error = %e, "snapshot save failed");
    }

    let system = system_prompt(context.role, &context.repository, context.file_text.as_deref());
    let session = ConversationSession::new(system, context.role, context.repository, context.file);

    let mut repl = Repl::new(
        session,
        catalog,
        snapshots,
        config.save_folder_path.clone(),
        CompletionClient::new(model),
    );
    repl.run(&mut console).await?;
    Ok(())
}
