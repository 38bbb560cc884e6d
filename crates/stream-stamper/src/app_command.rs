use std::path::PathBuf;

/// Commands typed into the companion's console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a recording session.
    Start,
    /// Stop the current recording session.
    Stop,
    /// Resume the completed session, keeping its history.
    Resume,
    /// Discard the current session.
    Reset {
        /// Skip the lost-data confirmation.
        force: bool,
    },
    /// Copy the rendered timestamp list to the clipboard.
    Copy,
    /// Save the current session to disk.
    Save,
    /// Load a saved session.
    Open {
        /// File to load; bare names resolve in the sessions directory.
        path: PathBuf,
    },
    /// Show the current session.
    Status,
    /// Tell the gateway the stream went live.
    Live,
    /// Tell the gateway the stream ended.
    Offline,
    /// Edit the session's start time (`clear` or `YYYY-MM-DD HH:MM:SS`).
    EditStart {
        /// The raw value to apply.
        value: String,
    },
    /// Show the command list.
    Help,
    /// Exit the companion.
    Quit,
}

impl AppCommand {
    /// Parse one console line. `None` for empty or unknown input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let rest = parts.collect::<Vec<_>>().join(" ");

        match command {
            "start" => Some(AppCommand::Start),
            "stop" => Some(AppCommand::Stop),
            "resume" => Some(AppCommand::Resume),
            "reset" => Some(AppCommand::Reset {
                force: rest == "force",
            }),
            "copy" => Some(AppCommand::Copy),
            "save" => Some(AppCommand::Save),
            "open" if !rest.is_empty() => Some(AppCommand::Open {
                path: PathBuf::from(rest),
            }),
            "status" => Some(AppCommand::Status),
            "live" => Some(AppCommand::Live),
            "offline" => Some(AppCommand::Offline),
            "edit-start" if !rest.is_empty() => Some(AppCommand::EditStart { value: rest }),
            "help" => Some(AppCommand::Help),
            "quit" | "exit" => Some(AppCommand::Quit),
            _ => None,
        }
    }
}
