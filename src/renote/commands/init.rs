use crate::commands::{CmdMessage, CmdResult};
use crate::config::{RenoteConfig, CONFIG_FILENAME};
use crate::error::Result;
use crate::store::DocumentStore;

/// Write a default config file unless one is already there.
pub fn run<S: DocumentStore>(store: &mut S) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if store.exists(CONFIG_FILENAME) {
        result.add_message(CmdMessage::info(format!(
            "'{}' already exists, leaving it alone",
            CONFIG_FILENAME
        )));
        return Ok(result.with_config(RenoteConfig::load(&*store)?));
    }

    let config = RenoteConfig::default();
    config.save(store)?;
    result.add_message(CmdMessage::success(format!("Wrote '{}'", CONFIG_FILENAME)));
    Ok(result.with_config(config))
}
