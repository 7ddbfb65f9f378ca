#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Startup sequencing: snapshot resume gating and fresh setup prompts.

use std::collections::VecDeque;

use taskdraft_cli::console::{Console, Prompted};
use taskdraft_cli::setup::establish_session;
use taskdraft_core::UserRole;
use taskdraft_ingest::Ingestor;
use taskdraft_session::{SessionSnapshot, SnapshotStore};

struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: Vec::new(),
        }
    }

    fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, _prompt: &str) -> std::io::Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    fn line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}

#[test]
fn fresh_setup_collects_role_file_and_repository() {
    let tmp = tempfile::tempdir().unwrap();
    let snapshots = SnapshotStore::new(tmp.path().join("saved_session.json"));
    let mut console = ScriptedConsole::new(&["2", "n", "https://example.com/r"]);

    let context = match establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap()
    {
        Prompted::Value(context) => context,
        Prompted::Exit => panic!("expected a session context"),
    };

    assert_eq!(context.role, UserRole::Developer);
    assert_eq!(context.repository, "https://example.com/r");
    assert!(context.file.is_none());
    assert!(console.saw("✓ Repository noted: https://example.com/r"));
}

#[test]
fn invalid_role_choice_reprompts() {
    let tmp = tempfile::tempdir().unwrap();
    let snapshots = SnapshotStore::new(tmp.path().join("saved_session.json"));
    let mut console = ScriptedConsole::new(&["9", "1", "n", "repo"]);

    let context = match establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap()
    {
        Prompted::Value(context) => context,
        Prompted::Exit => panic!("expected a session context"),
    };

    assert_eq!(context.role, UserRole::ProductManager);
    assert!(console.saw("Invalid choice"));
}

#[test]
fn attaching_a_text_file_extracts_it() {
    let tmp = tempfile::tempdir().unwrap();
    let spec = tmp.path().join("spec.txt");
    std::fs::write(&spec, "paginate the orders table").unwrap();
    let snapshots = SnapshotStore::new(tmp.path().join("saved_session.json"));

    let path = spec.display().to_string();
    let mut console = ScriptedConsole::new(&["2", "y", &path, "repo"]);
    let context = match establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap()
    {
        Prompted::Value(context) => context,
        Prompted::Exit => panic!("expected a session context"),
    };

    let file = context.file.unwrap();
    assert_eq!(file.name, "spec.txt");
    assert_eq!(context.file_text.as_deref(), Some("paginate the orders table"));
    assert!(console.saw("File loaded successfully"));
}

#[test]
fn unreadable_file_reprompts_then_skip_continues() {
    let tmp = tempfile::tempdir().unwrap();
    let snapshots = SnapshotStore::new(tmp.path().join("saved_session.json"));
    let mut console = ScriptedConsole::new(&["2", "y", "/no/such/file.txt", "skip", "repo"]);

    let context = match establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap()
    {
        Prompted::Value(context) => context,
        Prompted::Exit => panic!("expected a session context"),
    };

    assert!(context.file.is_none());
    assert!(console.saw("File not found"));
}

#[test]
fn usable_snapshot_offers_resume() {
    let tmp = tempfile::tempdir().unwrap();
    let snapshots = SnapshotStore::new(tmp.path().join("saved_session.json"));
    snapshots
        .save(&SessionSnapshot::now(
            UserRole::ProductManager,
            "https://example.com/old",
            None,
        ))
        .unwrap();

    let mut console = ScriptedConsole::new(&["y"]);
    let context = match establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap()
    {
        Prompted::Value(context) => context,
        Prompted::Exit => panic!("expected a session context"),
    };

    assert_eq!(context.role, UserRole::ProductManager);
    assert_eq!(context.repository, "https://example.com/old");
}

#[test]
fn declining_resume_clears_snapshot_and_runs_fresh_setup() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("saved_session.json");
    let snapshots = SnapshotStore::new(&path);
    snapshots
        .save(&SessionSnapshot::now(
            UserRole::ProductManager,
            "https://example.com/old",
            None,
        ))
        .unwrap();

    let mut console = ScriptedConsole::new(&["n", "2", "n", "https://example.com/new"]);
    let context = match establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap()
    {
        Prompted::Value(context) => context,
        Prompted::Exit => panic!("expected a session context"),
    };

    assert_eq!(context.role, UserRole::Developer);
    assert_eq!(context.repository, "https://example.com/new");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}

#[test]
fn empty_snapshot_object_goes_straight_to_fresh_setup() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("saved_session.json");
    std::fs::write(&path, "{}").unwrap();
    let snapshots = SnapshotStore::new(&path);

    // No resume question is asked: the first input is the role choice.
    let mut console = ScriptedConsole::new(&["2", "n", "repo"]);
    let context = match establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap()
    {
        Prompted::Value(context) => context,
        Prompted::Exit => panic!("expected a session context"),
    };

    assert_eq!(context.role, UserRole::Developer);
    assert!(!console.saw("Resume"));
}

#[test]
fn exit_is_honored_at_every_setup_prompt() {
    let tmp = tempfile::tempdir().unwrap();
    let snapshots = SnapshotStore::new(tmp.path().join("saved_session.json"));

    for script in [
        vec!["EXIT"],
        vec!["2", "exit"],
        vec!["2", "y", "Exit"],
        vec!["2", "n", "EXIT"],
    ] {
        let mut console = ScriptedConsole::new(&script);
        let outcome =
            establish_session(&mut console, &Ingestor::default(), &snapshots).unwrap();
        assert!(matches!(outcome, Prompted::Exit), "script {script:?}");
    }
}
