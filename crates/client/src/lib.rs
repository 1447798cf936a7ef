//! Composition root for the duel console client.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (local match against the scripted AI)
//!   └─→ Console (line-oriented presentation via RuntimeHandle only)
//! ```
//!
//! Content and configuration are resolved by [`ClientBuilder`]; the console
//! never touches the engine directly.

mod builder;
pub mod config;
pub mod console;
pub mod logging;

pub use builder::ClientBuilder;
pub use config::ClientConfig;
pub use console::{Console, ConsoleCommand};

use anyhow::Result;

/// Top-level client container.
pub struct Client {
    runtime: runtime::Runtime,
    console: Console,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Hand control to the console until the user quits, then stop the runtime.
    pub async fn run(self) -> Result<()> {
        let console_result = self.console.run().await;
        self.runtime.shutdown().await?;
        console_result
    }
}
