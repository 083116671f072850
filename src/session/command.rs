//! Session command parsing.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the knowledge summary.
    Status,
    /// Print the knowledge summary as JSON.
    StatusJson,
    /// Print Prometheus metrics.
    Metrics,
    /// Print the command list.
    Help,
    /// Stop scanning and end the session.
    Quit,
    /// Free text for the responder.
    Ask(String),
    /// Blank line.
    Empty,
}

impl Command {
    /// Parse a line. Control words are matched case-insensitively after trimming.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Self::Empty,
            "quit" | "exit" => Self::Quit,
            "status" => Self::Status,
            "status json" => Self::StatusJson,
            "metrics" => Self::Metrics,
            "help" => Self::Help,
            _ => Self::Ask(trimmed.to_string()),
        }
    }
}
