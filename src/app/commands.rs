//! Input line parser.
//!
//! A line is either a slash command (`/back`, `/go <path>`, ...) or a kiosk
//! path to open. Paths also start with `/`, so only recognized command words
//! are treated as commands; anything else is a location.

/// A parsed input line.
#[derive(Debug, PartialEq)]
pub enum ParsedCommand {
    Go { location: String },
    Back,
    Forward,
    Home,
    Status,
    Help,
    Quit,
    /// A known command with missing arguments.
    Usage(&'static str),
}

#[derive(Debug, PartialEq)]
pub enum InputLine {
    Command(ParsedCommand),
    Location(String),
    Empty,
    /// Neither a command nor an absolute path.
    Invalid(String),
}

pub const HELP_LINES: &[&str] = &[
    "/<path>          Open a kiosk path, e.g. /location/park1/set/zoo2",
    "/go <path>       Same as typing the path",
    "/back, /forward  Move through history (also Alt+Left / Alt+Right)",
    "/home            Go to the current location's home set",
    "/status          Show watchdog and history details",
    "/quit            Leave the shell (also Ctrl+C)",
];

pub fn parse_input(input: &str) -> InputLine {
    let input = input.trim();
    if input.is_empty() {
        return InputLine::Empty;
    }
    if !input.starts_with('/') {
        return InputLine::Invalid(input.to_string());
    }
    match parse_command(input) {
        Some(cmd) => InputLine::Command(cmd),
        None => InputLine::Location(input.to_string()),
    }
}

/// Parse a slash command. Returns `None` for input that is not a recognized
/// command word. Command words are case-insensitive.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let rest = input.trim().strip_prefix('/')?;
    let mut parts = rest.splitn(2, ' ');
    let word = parts.next()?;
    if word.contains('/') || word.contains('?') {
        return None;
    }
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match word.to_lowercase().as_str() {
        "go" | "open" => match arg {
            Some(location) if location.starts_with('/') => Some(ParsedCommand::Go {
                location: location.to_string(),
            }),
            Some(location) => Some(ParsedCommand::Go {
                location: format!("/{}", location),
            }),
            None => Some(ParsedCommand::Usage("/go <path>")),
        },
        "back" => Some(ParsedCommand::Back),
        "forward" | "fwd" => Some(ParsedCommand::Forward),
        "home" => Some(ParsedCommand::Home),
        "status" => Some(ParsedCommand::Status),
        "help" | "?" => Some(ParsedCommand::Help),
        "quit" | "exit" => Some(ParsedCommand::Quit),
        _ => None,
    }
}
