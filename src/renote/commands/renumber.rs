use crate::commands::{apply, discover, verify, CmdResult};
use crate::config::RenoteConfig;
use crate::error::Result;
use crate::store::DocumentStore;

/// Discover, apply and verify in one go.
pub fn run<S: DocumentStore>(store: &mut S, config: &RenoteConfig) -> Result<CmdResult> {
    let discovered = discover::run(store, config)?;
    let applied = apply::run(store, config)?;
    let verified = verify::run(store, config)?;
    Ok(discovered.merge(applied).merge(verified))
}
