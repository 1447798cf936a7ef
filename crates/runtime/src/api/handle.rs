//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! picking, confirming, restarting and streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Element, ElementPair};

use super::errors::{Result, RuntimeError};
use super::view::MatchView;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Add one element to the local side's picks.
    ///
    /// Refused picks (stunned, already confirmed, two held, match over)
    /// return an error and change nothing.
    pub async fn pick(&self, element: Element) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Pick {
            element,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Lock in the local side's two picks and return them.
    pub async fn confirm(&self) -> Result<ElementPair> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Confirm { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Drop unconfirmed picks.
    pub async fn clear_picks(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::ClearPicks { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Start a fresh session at turn 1. Only local matches support this.
    pub async fn restart(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Restart { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query a read-only snapshot for presentation
    pub async fn view(&self) -> Result<MatchView> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::View { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Match` - Session, turn, pick and outcome changes
    /// - `Topic::Log` - Combat log lines
    /// - `Topic::Timer` - Countdown seconds
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut log_rx = handle.subscribe(Topic::Log);
    /// while let Ok(event) = log_rx.recv().await {
    ///     // Print the line
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
