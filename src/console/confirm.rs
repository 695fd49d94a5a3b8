//! Operator confirmation prompts

use std::io::{BufRead, Write};

/// Asks the operator a yes/no question before a destructive request
pub trait Confirmer {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompts on stdout and reads one line from stdin
#[derive(Debug, Default)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

/// Fixed answer, used for `--yes` and in tests. Remembers what was asked.
#[derive(Debug, Default)]
pub struct AutoConfirm {
    answer: bool,
    asked: Vec<String>,
}

impl AutoConfirm {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: Vec::new(),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answer
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "예" | "네" | "ㅇ"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(is_yes("네"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[test]
    fn test_auto_confirm_records_prompts() {
        let mut confirmer = AutoConfirm::no();
        assert!(!confirmer.confirm("계속할까요?"));
        assert_eq!(confirmer.asked(), ["계속할까요?".to_string()]);
    }
}
