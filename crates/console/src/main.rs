use std::io;

use anyhow::Context;
use hbnb_console::{Console, ConsoleConfig};
use hbnb_storage::{StorageConfig, Store};

fn main() -> anyhow::Result<()> {
    hbnb_observability::init();

    let storage = StorageConfig::from_env();
    let store = Store::open(&storage)
        .with_context(|| format!("failed to load {}", storage.file_path.display()))?;
    tracing::info!(path = %storage.file_path.display(), records = store.len(), "store ready");

    let mut console = Console::new(store, ConsoleConfig::detect(), io::stdout().lock());
    console
        .run(io::stdin().lock())
        .context("console session failed")?;
    Ok(())
}
