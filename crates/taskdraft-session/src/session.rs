use taskdraft_core::{FileDescriptor, Message, UserRole};

/// An ordered message log with an explicit append contract.
///
/// The log always starts with exactly one system message. When an optional
/// capacity is set, appending beyond it evicts the oldest non-system message
/// first; the leading system message is never evicted.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
    capacity: Option<usize>,
}

impl MessageLog {
    /// Creates a log containing only `system`, with an optional total
    /// capacity (system message included).
    pub fn new(system: Message, capacity: Option<usize>) -> Self {
        Self {
            messages: vec![system],
            capacity,
        }
    }

    /// Appends `message` to the end, evicting the oldest dialogue message if
    /// the capacity would be exceeded.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        if let Some(cap) = self.capacity {
            // Keep index 0 (the system message) and drop from index 1.
            while self.messages.len() > cap.max(1) {
                self.messages.remove(1);
            }
        }
    }

    /// The full ordered sequence, system message first.
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// The dialogue portion: everything after the system message.
    pub fn dialogue(&self) -> &[Message] {
        &self.messages[1..]
    }
}

/// The in-memory state of one conversation.
///
/// Owns the ordered message log plus the context it was built from (role,
/// repository reference, optional attached file). All mutations are pure
/// in-memory operations; persistence is the caller's concern.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    log: MessageLog,
    system_prompt: String,
    capacity: Option<usize>,
    role: UserRole,
    repository: String,
    file: Option<FileDescriptor>,
}

impl ConversationSession {
    /// Creates a fresh session whose log holds only the system prompt.
    pub fn new(
        system_prompt: impl Into<String>,
        role: UserRole,
        repository: impl Into<String>,
        file: Option<FileDescriptor>,
    ) -> Self {
        let system_prompt = system_prompt.into();
        Self {
            log: MessageLog::new(Message::system(system_prompt.clone()), None),
            system_prompt,
            capacity: None,
            role,
            repository: repository.into(),
            file,
        }
    }

    /// Caps the message log at `capacity` messages (system message
    /// included), evicting oldest-first past the cap.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self.log = MessageLog::new(Message::system(self.system_prompt.clone()), self.capacity);
        self
    }

    /// Appends a user message.
    pub fn append_user(&mut self, content: impl Into<String>) {
        self.log.push(Message::user(content));
    }

    /// Appends an assistant message.
    pub fn append_assistant(&mut self, content: impl Into<String>) {
        self.log.push(Message::assistant(content));
    }

    /// Replaces the log with a new single-system-message sequence built from
    /// the same role/repository/file context. Used by `NEW`.
    pub fn reset(&mut self) {
        self.log = MessageLog::new(Message::system(self.system_prompt.clone()), self.capacity);
    }

    /// Replaces the dialogue with `decoded`, keeping the current system
    /// message. Used by `OPEN`: the decoded sequence is appended verbatim,
    /// whatever its origin's metadata was.
    pub fn replace_conversation(&mut self, decoded: Vec<Message>) {
        self.reset();
        for message in decoded {
            self.log.push(message);
        }
    }

    /// The full ordered message sequence, system message first.
    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    /// The dialogue (non-system) messages in order.
    pub fn dialogue(&self) -> &[Message] {
        self.log.dialogue()
    }

    /// Number of dialogue messages.
    pub fn dialogue_len(&self) -> usize {
        self.log.dialogue().len()
    }

    /// Whether there is anything worth saving.
    pub fn has_dialogue(&self) -> bool {
        !self.log.dialogue().is_empty()
    }

    /// The user's role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// The repository reference string.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The attached file, if any.
    pub fn file(&self) -> Option<&FileDescriptor> {
        self.file.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use taskdraft_core::Role;

    fn session() -> ConversationSession {
        ConversationSession::new(
            "You are a helpful assistant.",
            UserRole::Developer,
            "https://example.com/r",
            None,
        )
    }

    #[test]
    fn starts_with_single_system_message() {
        let s = session();
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].role, Role::System);
        assert_eq!(s.dialogue_len(), 0);
        assert!(!s.has_dialogue());
    }

    #[test]
    fn turns_append_in_order() {
        let mut s = session();
        s.append_user("add pagination");
        s.append_assistant("Sure, which view?");
        let dialogue = s.dialogue();
        assert_eq!(dialogue.len(), 2);
        assert_eq!(dialogue[0], Message::user("add pagination"));
        assert_eq!(dialogue[1], Message::assistant("Sure, which view?"));
    }

    #[test]
    fn reset_rebuilds_from_same_context() {
        let mut s = session();
        s.append_user("hello");
        s.reset();
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].role, Role::System);
        assert_eq!(
            s.messages()[0].content,
            "You are a helpful assistant."
        );
    }

    #[test]
    fn replace_conversation_keeps_system_message() {
        let mut s = session();
        s.append_user("old turn");
        let system_before = s.messages()[0].clone();

        s.replace_conversation(vec![
            Message::user("restored question"),
            Message::assistant("restored answer"),
        ]);

        assert_eq!(s.messages()[0], system_before);
        assert_eq!(s.dialogue_len(), 2);
        assert_eq!(s.dialogue()[0].content, "restored question");
    }

    #[test]
    fn capacity_evicts_oldest_dialogue_first() {
        let mut s = session().with_capacity(4);
        s.append_user("u1");
        s.append_assistant("a1");
        s.append_user("u2");
        s.append_assistant("a2");

        // System message survives; u1 was evicted.
        assert_eq!(s.messages().len(), 4);
        assert_eq!(s.messages()[0].role, Role::System);
        assert_eq!(s.dialogue()[0].content, "a1");
        assert_eq!(s.dialogue()[2].content, "a2");
    }
}
