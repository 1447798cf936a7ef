//! Builder assembling the runtime and console from configuration.
use anyhow::{Context, Result};

use game_content::ContentFactory;
use game_core::{GameConfig, SpellCatalog};
use runtime::{Runtime, RuntimeConfig, SimpleAi};

use crate::config::ClientConfig;
use crate::console::Console;
use crate::Client;

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Load content, start the runtime and attach the console.
    pub fn build(self) -> Result<Client> {
        let (game, catalog) = self.load_content()?;

        // Environment overrides win over the content's config.toml.
        let runtime_config = RuntimeConfig {
            game,
            ..RuntimeConfig::default()
        }
        .with_env_overrides();

        let seed = self.config.ai_seed();
        tracing::info!(
            max_hp = runtime_config.game.max_hp,
            pick_time_limit_ms = runtime_config.game.pick_time_limit_ms,
            spells = catalog.len(),
            seed,
            "Starting local match against the AI"
        );

        let runtime = Runtime::builder()
            .config(runtime_config)
            .catalog(catalog)
            .opponent(SimpleAi::new(seed))
            .build()
            .context("failed to start the match runtime")?;
        let console = Console::new(runtime.handle());

        Ok(Client { runtime, console })
    }

    fn load_content(&self) -> Result<(GameConfig, SpellCatalog)> {
        let (config, (catalog, _report)) = match &self.config.data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                tracing::info!(data_dir = %dir.display(), "Loading content");
                (factory.load_config()?, factory.load_catalog()?)
            }
            None => (
                game_content::default_config()?,
                game_content::default_catalog()?,
            ),
        };
        Ok((config, catalog))
    }
}
