//! Line-oriented operator prompts.
//!
//! The saver only talks to the [`Prompt`] trait, so callers decide whether
//! answers come from a terminal or from canned input.
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub const NAME_QUESTION: &str = "Custom name for file? (if not, press Enter): ";

pub trait Prompt {
    /// Show `message` and return one line of input without its line terminator.
    fn ask(&mut self, message: &str) -> io::Result<String>;
}

/// Prompt backed by a line reader and a writer for the question text.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        // EOF reads as an empty answer.
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Ask a yes/no question; anything starting with `y` (any case) is affirmative.
pub fn confirm(prompt: &mut dyn Prompt, message: &str) -> io::Result<bool> {
    let answer = prompt.ask(message)?;
    Ok(is_affirmative(&answer))
}

/// Leading whitespace is not skipped: `" y"` declines.
pub fn is_affirmative(answer: &str) -> bool {
    answer.to_lowercase().starts_with('y')
}

/// Ask for a base file name, falling back to `default` on an empty answer.
pub fn ask_name(prompt: &mut dyn Prompt, default: &str) -> io::Result<String> {
    let answer = prompt.ask(NAME_QUESTION)?;
    let name = answer.trim();
    Ok(if name.is_empty() {
        default.to_string()
    } else {
        name.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn ask_writes_question_and_strips_newline() {
        let mut prompt = scripted("hello\r\nworld\n");
        assert_eq!(prompt.ask("first? ").unwrap(), "hello");
        assert_eq!(prompt.ask("second? ").unwrap(), "world");
        assert_eq!(prompt.into_output(), b"first? second? ");
    }

    #[test]
    fn eof_reads_as_empty_answer() {
        let mut prompt = scripted("");
        assert_eq!(prompt.ask("anything? ").unwrap(), "");
    }

    #[test]
    fn affirmative_answers() {
        for answer in ["y", "Y", "yes", "YES please", "yep  "] {
            assert!(is_affirmative(answer), "{answer:?} should confirm");
        }
        for answer in ["", "n", "no", "ok", "sure", " y", "\ty"] {
            assert!(!is_affirmative(answer), "{answer:?} should decline");
        }
    }

    #[test]
    fn empty_name_falls_back_to_default() {
        let mut prompt = scripted("\n");
        assert_eq!(ask_name(&mut prompt, "generated").unwrap(), "generated");

        let mut prompt = scripted("   \n");
        assert_eq!(ask_name(&mut prompt, "generated").unwrap(), "generated");
    }

    #[test]
    fn supplied_name_is_trimmed() {
        let mut prompt = scripted("  digits \n");
        assert_eq!(ask_name(&mut prompt, "generated").unwrap(), "digits");
        assert_eq!(prompt.into_output(), NAME_QUESTION.as_bytes());
    }
}
