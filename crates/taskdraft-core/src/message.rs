use serde::{Deserialize, Serialize};

/// The role of the participant that authored a [`Message`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A system-level instruction or prompt.
    System,
    /// The human end-user.
    User,
    /// The AI assistant.
    Assistant,
}

/// A single message exchanged within a conversation session.
///
/// Ordering is significant: a conversation is an ordered `Vec<Message>` whose
/// first element is always the system prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// The role of the message author.
    pub role: Role,
    /// The textual content of the message.
    pub content: String,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new message with [`Role::System`].
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a new message with [`Role::User`].
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new message with [`Role::Assistant`].
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Who the human on the other side of the prompt is.
///
/// Drives the system prompt: product managers get a requirements-focused
/// assistant, developers an implementation-focused one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Focus on feature requirements and acceptance criteria.
    ProductManager,
    /// Focus on implementation and file structure.
    Developer,
}

impl UserRole {
    /// Human-readable label, e.g. `"Product Manager"`.
    pub fn label(self) -> &'static str {
        match self {
            UserRole::ProductManager => "Product Manager",
            UserRole::Developer => "Developer",
        }
    }
}

/// Metadata of a task-description file attached to a session.
///
/// Immutable once created; a session carries at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Expanded path the file was read from.
    pub path: String,
    /// File name without the directory part.
    pub name: String,
    /// Number of characters extracted.
    pub size: usize,
    /// Lowercased extension including the leading dot, e.g. `".txt"`.
    #[serde(rename = "type")]
    pub kind: String,
}
