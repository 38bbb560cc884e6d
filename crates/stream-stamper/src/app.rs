use crate::{
    AppCommand, AppResult, ConsolePresenter, ManualStreamGateway, OutputHandler, SessionStore,
};

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use stream_stamper_core::{
    PlayData, PlayRecorder, RecordingPresenter, StreamEventKind, StreamSession,
    TimestampFormatter,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, instrument};

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Main application state.
///
/// Runs on the async runtime thread and drives the recorder from
/// console commands. Recorder notifications arrive on the watcher's
/// and gateway's background threads via [`ConsolePresenter`].
pub struct App {
    pub(crate) recorder: PlayRecorder,
    pub(crate) gateway: Arc<ManualStreamGateway>,
    pub(crate) presenter: Arc<ConsolePresenter>,
    pub(crate) output_handler: OutputHandler,
    pub(crate) session_store: SessionStore,
    pub(crate) formatter: TimestampFormatter,
}

impl App {
    /// Run the console command loop until `quit` or end of input.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Stream-Stamper starting");
        print_help();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(command) = AppCommand::parse(&line) else {
                println!("unknown command: {}", line.trim());
                print_help();
                continue;
            };

            if command == AppCommand::Quit {
                break;
            }
            if let Err(e) = self.handle_command(command) {
                error!(error = %e, "Command failed");
                println!("error: {}", e);
            }
        }

        // Best-effort teardown; a no-op unless a recording is live.
        let session = self.recorder.stop_recording();
        self.save_if_recorded(&session);
        info!("Stream-Stamper shut down successfully");

        Ok(())
    }

    /// Persist anything worth keeping, logging rather than failing.
    fn save_if_recorded(&self, session: &StreamSession<PlayData>) {
        if !session.has_content() {
            return;
        }
        match self.session_store.save(session) {
            Ok(path) => println!("saved {}", path.display()),
            Err(e) => error!(error = %e, "Failed to save session"),
        }
    }

    fn handle_command(&mut self, command: AppCommand) -> AppResult<()> {
        match command {
            AppCommand::Start => {
                let session = self.recorder.start_recording(self.presenter())?;
                println!("session {:?}", session.status);
            }
            AppCommand::Stop => {
                let session = self.recorder.stop_recording();
                println!(
                    "session {:?} ({} timestamps)",
                    session.status,
                    session.count_timestamps()
                );
                self.save_if_recorded(&session);
            }
            AppCommand::Resume => {
                let session = self.recorder.resume_recording(self.presenter())?;
                println!(
                    "session {:?} ({} timestamps)",
                    session.status,
                    session.count_timestamps()
                );
            }
            AppCommand::Reset { force } => {
                if self.recorder.confirm_reset_recording() && !force {
                    println!("session has recorded data; use `reset force` to discard it");
                    return Ok(());
                }
                self.recorder.reset_recording()?;
                println!("session reset");
            }
            AppCommand::Copy => {
                let session = self.recorder.current_session();
                if self.output_handler.copy_session(&session, &self.formatter)? {
                    println!("{} timestamps copied", session.count_timestamps());
                } else {
                    println!("session has no start time, nothing copied");
                }
            }
            AppCommand::Save => {
                let session = self.recorder.current_session();
                if !session.has_content() {
                    println!("session is empty, nothing saved");
                    return Ok(());
                }
                let path = self.session_store.save(&session)?;
                println!("saved {}", path.display());
            }
            AppCommand::Open { path } => {
                let session = self.session_store.load(&path)?;
                let session = self.recorder.load_session(session)?;
                println!(
                    "loaded session with {} timestamps",
                    session.count_timestamps()
                );
            }
            AppCommand::Status => {
                let session = self.recorder.current_session();
                let start = session
                    .start_time
                    .map(|t| t.format(START_TIME_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:?}, started {}, {} timestamps",
                    session.status,
                    start,
                    session.count_timestamps()
                );
            }
            AppCommand::Live => self.gateway.emit(StreamEventKind::StreamStarted),
            AppCommand::Offline => self.gateway.emit(StreamEventKind::StreamEnded),
            AppCommand::EditStart { value } => {
                let start_time = if value == "clear" {
                    None
                } else {
                    match parse_start_time(&value) {
                        Some(t) => Some(t),
                        None => {
                            println!("usage: edit-start clear | edit-start {}", START_TIME_FORMAT);
                            return Ok(());
                        }
                    }
                };
                let session = self.recorder.edit_start_time(start_time);
                println!("start time set to {:?}", session.start_time);
            }
            AppCommand::Help => print_help(),
            AppCommand::Quit => {}
        }
        Ok(())
    }

    fn presenter(&self) -> Arc<dyn RecordingPresenter> {
        Arc::clone(&self.presenter) as Arc<dyn RecordingPresenter>
    }
}

/// Parse a local `YYYY-MM-DD HH:MM:SS` value, `None` when invalid or
/// ambiguous (DST fold).
pub(crate) fn parse_start_time(value: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value, START_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

fn print_help() {
    println!(
        "commands:\n  \
         start | stop | resume | reset [force]\n  \
         copy | save | open <file> | status\n  \
         live | offline | edit-start <clear | YYYY-MM-DD HH:MM:SS>\n  \
         help | quit"
    );
}
