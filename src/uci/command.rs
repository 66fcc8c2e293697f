//! Splitting protocol lines into commands.

/// One protocol command with its whitespace-separated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand<'a> {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<&'a str>),
    Go(Vec<&'a str>),
    SetOption(Vec<&'a str>),
    Stop,
    PonderHit,
    Quit,
    Unknown(&'a str),
}

/// Parse one line; blank lines yield `None`.
#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand<'_>> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let args = || parts.clone().collect::<Vec<&str>>();

    let cmd = match head {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(args()),
        "go" => UciCommand::Go(args()),
        "setoption" => UciCommand::SetOption(args()),
        "stop" => UciCommand::Stop,
        "ponderhit" => UciCommand::PonderHit,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(line.trim()),
    };

    Some(cmd)
}
