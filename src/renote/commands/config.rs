use crate::commands::{CmdMessage, CmdResult};
use crate::config::RenoteConfig;
use crate::error::{RenoteError, Result};
use crate::store::DocumentStore;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<S: DocumentStore>(store: &mut S, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = RenoteConfig::load(&*store)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = RenoteConfig::load(&*store)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = RenoteConfig::load(&*store)?;
            match config.set(&key, &value) {
                Ok(()) => {}
                Err(RenoteError::Config(e)) => {
                    let mut res = CmdResult::default();
                    res.add_message(CmdMessage::error(e));
                    return Ok(res);
                }
                Err(RenoteError::Pattern(e)) => {
                    let mut res = CmdResult::default();
                    res.add_message(CmdMessage::error(format!("Invalid pattern for {}: {}", key, e)));
                    return Ok(res);
                }
                Err(e) => return Err(e),
            }
            config.save(store)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}
