//! Role-specific system prompts.

use taskdraft_core::UserRole;

/// Builds the system prompt for a session from the user's role, the
/// repository reference, and the extracted task-file text (if any). The
/// file text is inlined between `---` fences so the model sees it as part
/// of its instructions, never as a user turn.
pub fn system_prompt(role: UserRole, repository: &str, task_text: Option<&str>) -> String {
    let task_context = match task_text {
        Some(text) => format!(
            "\n\nThe user has provided this task description:\n---\n{text}\n---\n"
        ),
        None => String::new(),
    };

    match role {
        UserRole::ProductManager => format!(
            "You are an AI assistant helping a Product Manager write clear, detailed task descriptions.\n\
             \n\
             The codebase you're working with is at: {repository}{task_context}\n\
             \n\
             Your goals:\n\
             - Help create specific, actionable task descriptions\n\
             - Ask clarifying questions about feature requirements\n\
             - Suggest acceptance criteria\n\
             - Consider edge cases and user experience\n\
             - Focus on WHAT needs to be built, not HOW to build it\n\
             \n\
             Be concise, professional, and focus on gathering clear requirements."
        ),
        UserRole::Developer => format!(
            "You are an AI assistant helping a Developer implement tasks.\n\
             \n\
             The codebase you're working with is at: {repository}{task_context}\n\
             \n\
             Your goals:\n\
             - Help identify which files need to be modified\n\
             - Suggest implementation approaches\n\
             - Explain code structure and architecture patterns\n\
             - Point out relevant functions, classes, or modules\n\
             - Focus on HOW to implement features\n\
             \n\
             Be technical, specific, and focus on code implementation details."
        ),
    }
}
