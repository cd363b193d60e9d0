//! Command parser - recognises the bootstrap token and splits command lines

/// Literal prefix marking a message as a command invocation
pub const COMMAND_BOOTSTRAP: &str = "/cmd ";

/// A command line split into name and argument string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    /// Remaining tokens rejoined with single spaces
    pub args: String,
}

/// Strip the bootstrap token, if the text starts with it
pub fn strip_bootstrap(text: &str) -> Option<&str> {
    text.strip_prefix(COMMAND_BOOTSTRAP)
}

/// Parse a command line (without the bootstrap token)
pub fn parse_command(line: &str) -> ParsedCommand {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or("").to_string();
    let args = parts.collect::<Vec<_>>().join(" ");
    ParsedCommand { name, args }
}
