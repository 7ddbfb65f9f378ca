use std::io::{BufRead, Write};

/// Prompt-driven terminal I/O.
///
/// The dispatcher and setup flow are written against this trait so the
/// end-to-end tests can drive them with a scripted console instead of a TTY.
pub trait Console {
    /// Shows `prompt` (without a trailing newline) and reads one line of
    /// input, trimmed. Returns `None` on end of input (Ctrl-D / closed
    /// stdin), which callers treat like `EXIT`.
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;

    /// Writes one line of normal output.
    fn line(&mut self, text: &str);
}

/// The real console over stdin/stdout.
pub struct StdioConsole;

impl Console for StdioConsole {
    fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        let mut buf = String::new();
        let n = std::io::stdin().lock().read_line(&mut buf)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(buf.trim().to_string()))
        }
    }

    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// The outcome of an interactive prompt: either a value, or the user asked
/// to quit (typed `EXIT` at any prompt, or closed stdin).
#[derive(Debug)]
pub enum Prompted<T> {
    /// The prompt produced a value.
    Value(T),
    /// Terminate the program with success.
    Exit,
}

/// Whether `input` is the quit token, recognized case-insensitively at every
/// prompt.
pub fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case("EXIT")
}
