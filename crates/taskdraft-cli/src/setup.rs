//! Startup sequencing: resume-or-fresh session establishment.
//!
//! A usable snapshot offers a resume; declining clears it and falls through
//! to fresh setup (role menu, optional task file, repository reference).
//! `EXIT` is honored at every prompt here, as is end of input.

use taskdraft_core::{FileDescriptor, TaskdraftResult, UserRole};
use taskdraft_ingest::{expand_path, Ingestor};
use taskdraft_session::SnapshotStore;

use crate::console::{is_exit, Console, Prompted};

const RULE: &str = "------------------------------------------------------------";

/// Everything needed to build the initial [`ConversationSession`] and its
/// snapshot.
///
/// [`ConversationSession`]: taskdraft_session::ConversationSession
#[derive(Debug)]
pub struct SessionContext {
    /// The chosen role.
    pub role: UserRole,
    /// The repository reference string.
    pub repository: String,
    /// The attached task file, if any.
    pub file: Option<FileDescriptor>,
    /// The extracted text of the attached file, for the system prompt.
    pub file_text: Option<String>,
}

/// Establishes the session context, resuming from the snapshot store when
/// the user accepts.
pub fn establish_session(
    console: &mut dyn Console,
    ingestor: &Ingestor,
    snapshots: &SnapshotStore,
) -> TaskdraftResult<Prompted<SessionContext>> {
    if let Some(snapshot) = snapshots.load() {
        console.line(&format!("\n{RULE}"));
        console.line("A previous session was found:");
        console.line(&format!("  Role: {}", snapshot.role.label()));
        console.line(&format!("  Repository: {}", snapshot.repository));
        if let Some(file) = &snapshot.file {
            console.line(&format!("  Task file: {}", file.name));
        }
        console.line(&format!("  Saved: {}", snapshot.timestamp));
        console.line(RULE);

        loop {
            let Some(answer) = console.read_line("Resume this session? (y/n): ")? else {
                return Ok(Prompted::Exit);
            };
            if is_exit(&answer) {
                return Ok(Prompted::Exit);
            }
            match answer.to_lowercase().as_str() {
                "y" => {
                    // Re-extract the task file so the system prompt matches
                    // what the original session saw. A file that has gone
                    // missing or unreadable is dropped with a notice.
                    let (file, file_text) = match &snapshot.file {
                        Some(descriptor) => {
                            match ingestor.extract(std::path::Path::new(&descriptor.path)) {
                                Ok(doc) => (Some(doc.descriptor), Some(doc.text)),
                                Err(e) => {
                                    console.line(&format!(
                                        "❌ Task file could not be reloaded ({e}); continuing without it."
                                    ));
                                    (None, None)
                                }
                            }
                        }
                        None => (None, None),
                    };
                    return Ok(Prompted::Value(SessionContext {
                        role: snapshot.role,
                        repository: snapshot.repository,
                        file,
                        file_text,
                    }));
                }
                "n" => {
                    if let Err(e) = snapshots.clear() {
                        console.line(&format!("❌ Could not clear the saved session: {e}"));
                        tracing::warn!(error = %e, "snapshot clear failed");
                    }
                    break;
                }
                _ => console.line("❌ Please enter 'y' or 'n'."),
            }
        }
    }

    fresh_setup(console, ingestor)
}

fn fresh_setup(
    console: &mut dyn Console,
    ingestor: &Ingestor,
) -> TaskdraftResult<Prompted<SessionContext>> {
    let role = match select_role(console)? {
        Prompted::Value(role) => role,
        Prompted::Exit => return Ok(Prompted::Exit),
    };
    let file = match prompt_task_file(console, ingestor)? {
        Prompted::Value(file) => file,
        Prompted::Exit => return Ok(Prompted::Exit),
    };
    let repository = match prompt_repository(console)? {
        Prompted::Value(repository) => repository,
        Prompted::Exit => return Ok(Prompted::Exit),
    };

    let (file, file_text) = match file {
        Some((descriptor, text)) => (Some(descriptor), Some(text)),
        None => (None, None),
    };
    Ok(Prompted::Value(SessionContext {
        role,
        repository,
        file,
        file_text,
    }))
}

/// Role selection menu: 1 = Product Manager, 2 = Developer.
pub fn select_role(console: &mut dyn Console) -> TaskdraftResult<Prompted<UserRole>> {
    console.line("\nPlease select your role:\n");
    console.line("1. Product Manager - Focus on feature requirements");
    console.line("2. Developer - Focus on implementation and file structure");
    console.line("\nType 'EXIT' at any time to quit the program.\n");

    loop {
        let Some(choice) = console.read_line("Enter your choice (1 or 2): ")? else {
            return Ok(Prompted::Exit);
        };
        if is_exit(&choice) {
            return Ok(Prompted::Exit);
        }
        match choice.as_str() {
            "1" => return Ok(Prompted::Value(UserRole::ProductManager)),
            "2" => return Ok(Prompted::Value(UserRole::Developer)),
            _ => console.line("❌ Invalid choice. Please enter 1 or 2."),
        }
    }
}

/// Optional task-description file: `y`/`n`, then a path or `skip`.
pub fn prompt_task_file(
    console: &mut dyn Console,
    ingestor: &Ingestor,
) -> TaskdraftResult<Prompted<Option<(FileDescriptor, String)>>> {
    console.line(&format!("\n{RULE}"));
    console.line("Do you have a task description file? (TXT, MD, PDF, DOC/DOCX)");
    console.line("This can be a requirements document, spec, or any task details.");
    console.line(&format!("{RULE}\n"));

    loop {
        let Some(choice) = console.read_line("Provide a file? (y/n): ")? else {
            return Ok(Prompted::Exit);
        };
        if is_exit(&choice) {
            return Ok(Prompted::Exit);
        }
        match choice.to_lowercase().as_str() {
            "n" => return Ok(Prompted::Value(None)),
            "y" => loop {
                let Some(raw) =
                    console.read_line("\nEnter file path (or 'skip' to continue without): ")?
                else {
                    return Ok(Prompted::Exit);
                };
                if is_exit(&raw) {
                    return Ok(Prompted::Exit);
                }
                if raw.eq_ignore_ascii_case("skip") {
                    return Ok(Prompted::Value(None));
                }

                match ingestor.extract(&expand_path(&raw)) {
                    Ok(doc) => {
                        console.line(&format!(
                            "✓ File loaded successfully: {}",
                            doc.descriptor.name
                        ));
                        console.line(&format!("  ({} characters read)", doc.descriptor.size));
                        return Ok(Prompted::Value(Some((doc.descriptor, doc.text))));
                    }
                    Err(e) => {
                        console.line(&format!("❌ {e}"));
                        console
                            .line("Please try again or type 'skip' to continue without a file.");
                    }
                }
            },
            _ => console.line("❌ Please enter 'y' or 'n'."),
        }
    }
}

/// Repository reference prompt: any non-empty string is accepted, not
/// validated.
pub fn prompt_repository(console: &mut dyn Console) -> TaskdraftResult<Prompted<String>> {
    console.line(&format!("\n{RULE}"));
    console.line("Please provide a repository URL to use as context.");
    console.line(&format!("{RULE}\n"));

    loop {
        let Some(repo) = console.read_line("Repository URL: ")? else {
            return Ok(Prompted::Exit);
        };
        if is_exit(&repo) {
            return Ok(Prompted::Exit);
        }
        if repo.is_empty() {
            console.line("❌ Please enter a valid repository URL.");
        } else {
            console.line(&format!("✓ Repository noted: {repo}"));
            return Ok(Prompted::Value(repo));
        }
    }
}
