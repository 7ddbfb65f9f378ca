//! The command dispatcher.
//!
//! Each iteration reads one line, classifies it as a control command or a
//! chat turn, and routes it. Recoverable failures print a `❌`-prefixed
//! diagnostic and keep the loop running; only `EXIT` (or end of input) ends
//! it.

use std::path::{Path, PathBuf};

use chrono::Utc;
use taskdraft_core::TaskdraftResult;
use taskdraft_llm::CompletionClient;
use taskdraft_session::{
    transcript, ConversationSession, ExportCatalog, ExportEntry, SnapshotStore, TranscriptMeta,
};

use crate::console::{is_exit, Console};

const BAR: &str = "============================================================";
const RULE: &str = "------------------------------------------------------------";

/// The fixed command vocabulary, matched case-insensitively. Anything else
/// non-empty is a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    New,
    Save,
    History,
    Open,
    List,
    Help,
}

impl Command {
    /// Parses `input` as a command, or `None` for a chat turn.
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_uppercase().as_str() {
            "EXIT" => Some(Command::Exit),
            "NEW" => Some(Command::New),
            "SAVE" => Some(Command::Save),
            "HISTORY" => Some(Command::History),
            "OPEN" => Some(Command::Open),
            "LIST" => Some(Command::List),
            "HELP" => Some(Command::Help),
            _ => None,
        }
    }
}

// Signal from a command handler back to the loop.
enum Flow {
    Continue,
    Exit,
}

/// Sanitizes a user-supplied export name: only alphanumerics, spaces, `-`
/// and `_` are retained, and space runs collapse to a single `_`.
/// Idempotent; may produce an empty string, which callers re-prompt on.
pub fn sanitize_filename(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// The REPL: owns the conversation session, the stores, and the completion
/// client.
pub struct Repl {
    /// The live conversation.
    pub session: ConversationSession,
    catalog: ExportCatalog,
    snapshots: SnapshotStore,
    save_dir: PathBuf,
    client: CompletionClient,
}

impl Repl {
    pub fn new(
        session: ConversationSession,
        catalog: ExportCatalog,
        snapshots: SnapshotStore,
        save_dir: PathBuf,
        client: CompletionClient,
    ) -> Self {
        Self {
            session,
            catalog,
            snapshots,
            save_dir,
            client,
        }
    }

    /// Runs the dispatcher until `EXIT` or end of input.
    pub async fn run(&mut self, console: &mut dyn Console) -> TaskdraftResult<()> {
        console.line(&format!("\n{BAR}"));
        console.line(&format!(
            "          CHAT SESSION - {}",
            self.session.role().label().to_uppercase()
        ));
        console.line(BAR);
        console.line("\nYou can now chat with the assistant.");
        console.line("Type 'HELP' for commands, 'EXIT' to quit.");

        loop {
            let Some(input) = console.read_line("\nYou: ")? else {
                self.farewell(console);
                return Ok(());
            };
            if input.is_empty() {
                continue;
            }

            let flow = match Command::parse(&input) {
                Some(Command::Exit) => Flow::Exit,
                Some(Command::New) => self.handle_new(console),
                Some(Command::Save) => self.handle_save(console)?,
                Some(Command::History) => {
                    self.handle_history(console);
                    Flow::Continue
                }
                Some(Command::Open) => self.handle_open(console)?,
                Some(Command::List) => {
                    self.handle_list(console);
                    Flow::Continue
                }
                Some(Command::Help) => {
                    self.handle_help(console);
                    Flow::Continue
                }
                None => {
                    self.chat_turn(console, &input).await;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                self.farewell(console);
                return Ok(());
            }
        }
    }

    fn farewell(&self, console: &mut dyn Console) {
        console.line(&format!("\n{BAR}"));
        console.line("Thank you for using TaskDraft!");
        console.line(&format!("{BAR}\n"));
    }

    fn handle_new(&mut self, console: &mut dyn Console) -> Flow {
        self.session.reset();
        if let Err(e) = self.snapshots.clear() {
            console.line(&format!("❌ Could not clear the saved session: {e}"));
            tracing::warn!(error = %e, "snapshot clear failed");
        }
        console.line("✓ Started a new conversation.");
        Flow::Continue
    }

    fn handle_save(&mut self, console: &mut dyn Console) -> TaskdraftResult<Flow> {
        if !self.session.has_dialogue() {
            console.line("❌ Nothing to save — the conversation is empty.");
            return Ok(Flow::Continue);
        }

        let name = loop {
            let Some(raw) = console.read_line("Name for this export: ")? else {
                return Ok(Flow::Exit);
            };
            if is_exit(&raw) {
                return Ok(Flow::Exit);
            }
            let sanitized = sanitize_filename(&raw);
            if sanitized.is_empty() {
                console.line("❌ That name has no usable characters. Please try another.");
            } else {
                break sanitized;
            }
        };

        let now = Utc::now();
        let filename = format!("{name}_{}.md", now.format("%Y%m%d_%H%M%S"));
        let path = self.save_dir.join(&filename);

        let meta = TranscriptMeta {
            role_label: self.session.role().label().to_string(),
            repository: self.session.repository().to_string(),
            file_name: self.session.file().map(|f| f.name.clone()),
            date: now,
        };
        let document = transcript::encode(self.session.dialogue(), &meta);

        if let Err(e) = std::fs::create_dir_all(&self.save_dir)
            .and_then(|()| std::fs::write(&path, &document))
        {
            console.line(&format!("❌ Could not write the transcript: {e}"));
            tracing::warn!(path = %path.display(), error = %e, "transcript write failed");
            return Ok(Flow::Continue);
        }

        let entry = ExportEntry {
            filename: filename.clone(),
            original_name: name,
            date: now.to_rfc3339(),
            role_label: self.session.role().label().to_string(),
            repository: self.session.repository().to_string(),
            file_path: path.display().to_string(),
        };
        if let Err(e) = self.catalog.append(entry) {
            console.line(&format!("❌ Saved the file, but not the catalog entry: {e}"));
            tracing::warn!(error = %e, "catalog append failed");
            return Ok(Flow::Continue);
        }

        console.line(&format!("✓ Conversation saved as {filename}"));
        Ok(Flow::Continue)
    }

    fn render_history(&self, console: &mut dyn Console, entries: &[ExportEntry]) {
        console.line(&format!("\n{RULE}"));
        console.line("SAVED CONVERSATIONS");
        console.line(RULE);
        for (i, entry) in entries.iter().enumerate() {
            console.line(&format!(
                "{}. {} — {} ({}) {}",
                i + 1,
                entry.original_name,
                entry.date,
                entry.role_label,
                entry.repository
            ));
        }
        console.line(RULE);
    }

    fn handle_history(&self, console: &mut dyn Console) {
        let entries = self.catalog.list();
        if entries.is_empty() {
            console.line("No saved conversations yet.");
        } else {
            self.render_history(console, &entries);
        }
    }

    fn handle_open(&mut self, console: &mut dyn Console) -> TaskdraftResult<Flow> {
        loop {
            // Re-list on every pass: indices are only stable within one
            // listing, and removal invalidates them.
            let entries = self.catalog.list();
            if entries.is_empty() {
                console.line("No saved conversations to open.");
                return Ok(Flow::Continue);
            }
            self.render_history(console, &entries);

            let Some(choice) =
                console.read_line("Open which one? (number, or 'cancel'): ")?
            else {
                return Ok(Flow::Exit);
            };
            if is_exit(&choice) {
                return Ok(Flow::Exit);
            }
            if choice.eq_ignore_ascii_case("cancel") || choice.eq_ignore_ascii_case("c") {
                return Ok(Flow::Continue);
            }

            let index = match choice.parse::<usize>() {
                Ok(n) if (1..=entries.len()).contains(&n) => n - 1,
                _ => {
                    console.line(&format!(
                        "❌ Invalid choice. Enter a number between 1 and {}.",
                        entries.len()
                    ));
                    continue;
                }
            };
            let entry = &entries[index];

            if !Path::new(&entry.file_path).exists() {
                console.line(&format!("❌ File no longer exists: {}", entry.file_path));
                let Some(answer) =
                    console.read_line("Remove this stale entry from the catalog? (y/n): ")?
                else {
                    return Ok(Flow::Exit);
                };
                if is_exit(&answer) {
                    return Ok(Flow::Exit);
                }
                if answer.eq_ignore_ascii_case("y") {
                    if let Err(e) = self.catalog.remove(entry) {
                        console.line(&format!("❌ Could not update the catalog: {e}"));
                        tracing::warn!(error = %e, "catalog remove failed");
                    } else {
                        console.line("✓ Stale entry removed.");
                    }
                }
                continue;
            }

            let document = match std::fs::read_to_string(&entry.file_path) {
                Ok(document) => document,
                Err(e) => {
                    console.line(&format!("❌ Could not read the transcript: {e}"));
                    continue;
                }
            };
            match transcript::decode(&document) {
                Ok(decoded) => {
                    if decoded.skipped_blocks > 0 {
                        console.line(&format!(
                            "❌ {} unrecognized block(s) in the transcript were skipped.",
                            decoded.skipped_blocks
                        ));
                    }
                    let count = decoded.messages.len();
                    self.session.replace_conversation(decoded.messages);
                    console.line(&format!("✓ Conversation restored ({count} messages)."));
                    return Ok(Flow::Continue);
                }
                Err(e) => {
                    console.line(&format!("❌ {e}"));
                    continue;
                }
            }
        }
    }

    fn handle_list(&self, console: &mut dyn Console) {
        console.line(&format!("\n{RULE}"));
        console.line("LOADED RESOURCES");
        console.line(RULE);
        console.line(&format!("Role: {}", self.session.role().label()));
        console.line(&format!("Repository: {}", self.session.repository()));
        match self.session.file() {
            Some(file) => {
                console.line("\nTask File:");
                console.line(&format!("  Name: {}", file.name));
                console.line(&format!("  Path: {}", file.path));
                console.line(&format!("  Type: {}", file.kind));
                console.line(&format!("  Size: {} characters", file.size));
            }
            None => console.line("\nTask File: None"),
        }
        console.line(&format!("\nStorage folder: {}", self.save_dir.display()));
        console.line(&format!(
            "Messages in current chat: {}",
            self.session.dialogue_len()
        ));
        console.line(RULE);
    }

    fn handle_help(&self, console: &mut dyn Console) {
        console.line("\nCommands (case-insensitive):");
        console.line("  EXIT     Quit the program");
        console.line("  NEW      Start a fresh conversation and clear the saved session");
        console.line("  SAVE     Export this conversation to a transcript file");
        console.line("  HISTORY  List saved conversations");
        console.line("  OPEN     Restore a saved conversation");
        console.line("  LIST     Show loaded resources and message count");
        console.line("  HELP     Show this message");
        console.line("Anything else is sent to the assistant as a chat message.");
    }

    async fn chat_turn(&mut self, console: &mut dyn Console, input: &str) {
        self.session.append_user(input);
        console.line("\nAssistant:");
        match self.client.complete(self.session.messages()).await {
            Ok(reply) => {
                console.line(&reply);
                self.session.append_assistant(reply);
            }
            Err(e) => {
                // The user turn stays in history; the failed turn simply has
                // no assistant reply attached.
                console.line(&format!("❌ Error communicating with the completion service: {e}"));
                console.line("Please check your API key and internet connection.");
                tracing::warn!(error = %e, "completion request failed");
            }
        }
    }
}
