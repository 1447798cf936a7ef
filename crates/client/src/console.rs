//! Line-oriented console presentation.
//!
//! Reads one command per line from stdin and forwards it through the
//! [`RuntimeHandle`]. Log lines, outcome and the last seconds of the
//! countdown are printed as the runtime publishes them.

use std::str::FromStr;

use anyhow::Result;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use game_core::Element;
use runtime::{Event, MatchEvent, MatchView, RuntimeHandle, Topic};

/// Countdown values at or below this are announced.
const COUNTDOWN_WARNING_SECS: u64 = 5;

/// One parsed input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Pick(Element),
    Confirm,
    Clear,
    Restart,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown command `{0}` (type `help`)")]
pub struct UnknownCommand(String);

impl FromStr for ConsoleCommand {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let word = line.trim();
        if let Ok(element) = Element::from_str(word) {
            return Ok(ConsoleCommand::Pick(element));
        }
        match word.to_ascii_lowercase().as_str() {
            "confirm" | "c" => Ok(ConsoleCommand::Confirm),
            "clear" => Ok(ConsoleCommand::Clear),
            "restart" => Ok(ConsoleCommand::Restart),
            "status" | "s" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
            _ => Err(UnknownCommand(word.to_owned())),
        }
    }
}

const HELP: &str = "commands: fire | water | wind | earth | confirm | clear | restart | status | quit";

/// Console front end bound to one runtime.
pub struct Console {
    handle: RuntimeHandle,
}

impl Console {
    pub fn new(handle: RuntimeHandle) -> Self {
        Self { handle }
    }

    /// Run until `quit` or end of input.
    pub async fn run(self) -> Result<()> {
        let printer = spawn_printer(&self.handle);
        println!("{HELP}");
        print_status(&self.handle.view().await?);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<ConsoleCommand>() {
                Ok(command) => command,
                Err(error) => {
                    println!("{error}");
                    continue;
                }
            };
            if command == ConsoleCommand::Quit {
                break;
            }
            self.execute(command).await?;
        }

        printer.abort();
        Ok(())
    }

    async fn execute(&self, command: ConsoleCommand) -> Result<()> {
        let outcome = match command {
            ConsoleCommand::Pick(element) => self.handle.pick(element).await,
            ConsoleCommand::Confirm => self.handle.confirm().await.map(|_| ()),
            ConsoleCommand::Clear => self.handle.clear_picks().await,
            ConsoleCommand::Restart => self.handle.restart().await,
            ConsoleCommand::Status => {
                let view = self.handle.view().await?;
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }
            ConsoleCommand::Help => {
                println!("{HELP}");
                return Ok(());
            }
            ConsoleCommand::Quit => return Ok(()),
        };

        // Refused picks are reported and otherwise ignored.
        if let Err(error) = outcome {
            tracing::debug!(error = %error, "Command refused");
            println!("! {error}");
        }
        print_status(&self.handle.view().await?);
        Ok(())
    }
}

fn spawn_printer(handle: &RuntimeHandle) -> JoinHandle<()> {
    let mut log_rx = handle.subscribe(Topic::Log);
    let mut match_rx = handle.subscribe(Topic::Match);
    let mut timer_rx = handle.subscribe(Topic::Timer);

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                event = log_rx.recv() => event,
                event = match_rx.recv() => event,
                event = timer_rx.recv() => event,
            };
            match received {
                Ok(Event::Log(event)) => println!("  {}", event.line),
                Ok(Event::Match(MatchEvent::Ended { outcome })) => println!("== {outcome} =="),
                Ok(Event::Timer(event))
                    if event.remaining_secs > 0
                        && event.remaining_secs <= COUNTDOWN_WARNING_SECS =>
                {
                    println!("  ({}s left)", event.remaining_secs);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Console printer lagged behind events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn print_status(view: &MatchView) {
    let side = view
        .side
        .map_or_else(|| "waiting".to_owned(), |side| side.to_string());
    println!(
        "[turn {} | {side} | you {}/{} | foe {}/{} | picks {} | {}s]",
        view.turn, view.my_hp, view.max_hp, view.opponent_hp, view.max_hp, view.picks,
        view.remaining_secs
    );
}
