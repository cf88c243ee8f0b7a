use crate::config::{Config, ResolvedConfig};
use crate::error::{CliError, Result};
use crate::output::mask;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current resolved configuration
    #[command(long_about = "Display the configuration pi would use right now.\n\n\
        Values come from CLI flags, then environment variables, then the config file.\n\
        The token is partially masked.\n\n\
        Example:\n\
        pi config show")]
    Show,
    /// Set a config value (api_base, user_token, username)
    #[command(long_about = "Persist a configuration value to ~/.pi/config.json.\n\n\
        Valid keys:\n\
          api_base     Pixela host (default: pixe.la)\n\
          user_token   Token sent as X-USER-TOKEN\n\
          username     Default user name when --username is omitted\n\n\
        Examples:\n\
        pi config set username c-know\n\
        pi config set user_token thisissecret")]
    Set {
        /// Config key to set
        key: String,
        /// Value to set
        value: String,
    },
    /// Show the config file path
    Path,
}

pub fn handle(cmd: ConfigCommand, resolved: &ResolvedConfig) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let display = serde_json::json!({
                "api_base": resolved.api_base,
                "user_token": resolved.token.as_deref().map(mask),
                "username": resolved.username,
                "config_file": Config::config_path().to_string_lossy().to_string(),
            });
            crate::output::print_json(&display);
        }
        ConfigCommand::Set { key, value } => {
            let mut cfg = Config::load_file();
            set_key(&mut cfg, &key, value)?;
            cfg.save_file()?;
            crate::output::print_success(&format!("Config '{key}' saved"));
        }
        ConfigCommand::Path => {
            println!("{}", Config::config_path().to_string_lossy());
        }
    }
    Ok(())
}

fn set_key(cfg: &mut Config, key: &str, value: String) -> Result<()> {
    match key {
        "api_base" | "api-base" => cfg.api_base = Some(value),
        "user_token" | "user-token" => cfg.user_token = Some(value),
        "username" => cfg.username = Some(value),
        _ => {
            return Err(CliError::InvalidInput(format!(
                "Unknown config key: {key}. Valid keys: api_base, user_token, username"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_keys() {
        let mut cfg = Config::default();
        set_key(&mut cfg, "api-base", "pixela.example.com".into()).unwrap();
        set_key(&mut cfg, "user_token", "thisissecret".into()).unwrap();
        set_key(&mut cfg, "username", "c-know".into()).unwrap();

        assert_eq!(cfg.api_base.as_deref(), Some("pixela.example.com"));
        assert_eq!(cfg.user_token.as_deref(), Some("thisissecret"));
        assert_eq!(cfg.username.as_deref(), Some("c-know"));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut cfg = Config::default();
        let err = set_key(&mut cfg, "color", "kuro".into()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
