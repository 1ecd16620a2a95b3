use crate::commands::{CmdMessage, CmdResult, NotePaths};
use crate::config::ScrawlConfig;
use crate::error::{Result, ScrawlError};

#[derive(Debug, Clone)]
pub enum ConfigAction {
    Show,
    Set { key: String, value: String },
}

pub fn run(paths: &NotePaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = ScrawlConfig::load(&paths.root)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::Show => {
            result.config = Some(config);
        }
        ConfigAction::Set { key, value } => {
            match key.as_str() {
                "asset-dir" => config.asset_dir = value.clone(),
                "sidecar-ext" => config.set_sidecar_ext(&value),
                "max-image-width" => {
                    config.max_image_width = value
                        .parse()
                        .map_err(|_| ScrawlError::Api(format!("Not a number: {}", value)))?;
                }
                "expiry-days" => {
                    config.expiry_days = if value.is_empty() || value == "off" {
                        None
                    } else {
                        Some(value.parse().map_err(|_| {
                            ScrawlError::Api(format!("Not a number: {}", value))
                        })?)
                    };
                }
                other => {
                    return Err(ScrawlError::Api(format!("Unknown config key: {}", other)));
                }
            }
            config.save(&paths.root)?;
            result.add_message(CmdMessage::success(format!("Set {} = {}", key, value)));
            result.config = Some(config);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(dir: &tempfile::TempDir) -> NotePaths {
        NotePaths {
            root: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn show_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&paths(&dir), ConfigAction::Show).unwrap();
        assert_eq!(result.config.unwrap(), ScrawlConfig::default());
    }

    #[test]
    fn set_persists() {
        let dir = tempfile::tempdir().unwrap();
        run(
            &paths(&dir),
            ConfigAction::Set {
                key: "expiry-days".into(),
                value: "30".into(),
            },
        )
        .unwrap();

        let reloaded = ScrawlConfig::load(dir.path()).unwrap();
        assert_eq!(reloaded.expiry_days, Some(30));
    }

    #[test]
    fn unknown_key_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            &paths(&dir),
            ConfigAction::Set {
                key: "bogus".into(),
                value: "1".into(),
            },
        );
        assert!(matches!(err, Err(ScrawlError::Api(_))));
    }
}
