use clap::{Args, Subcommand};
use serde::Serialize;

use multiprompt::defaults::{self, MultipromptConfig};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore multiprompt.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Write the current configuration to multiprompt.json
    Init,
    /// Reset configuration to built-in defaults (deletes multiprompt.json)
    Reset,
    /// Show the path to multiprompt.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<MultipromptConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            config: None,
            path: None,
            exists: None,
            deleted: None,
        }
    }
}

pub fn run(args: ConfigArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Init => init(),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let config = if builtin {
        defaults::builtin_defaults()
    } else {
        defaults::load_config()
    };

    Ok((
        ConfigOutput {
            config: Some(config),
            ..ConfigOutput::new("config.show")
        },
        0,
    ))
}

fn init() -> CmdResult<ConfigOutput> {
    let config = defaults::load_config();
    defaults::save_config(&config)?;

    Ok((
        ConfigOutput {
            config: Some(config),
            path: Some(defaults::config_path()?),
            ..ConfigOutput::new("config.init")
        },
        0,
    ))
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;

    Ok((
        ConfigOutput {
            deleted: Some(deleted),
            path: Some(defaults::config_path()?),
            ..ConfigOutput::new("config.reset")
        },
        0,
    ))
}

fn path() -> CmdResult<ConfigOutput> {
    Ok((
        ConfigOutput {
            path: Some(defaults::config_path()?),
            exists: Some(defaults::config_exists()),
            ..ConfigOutput::new("config.path")
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_show_ignores_config_file() {
        let (output, exit_code) = show(true).unwrap();

        assert_eq!(exit_code, 0);
        assert_eq!(output.config, Some(MultipromptConfig::default()));
        assert!(output.path.is_none());
    }

    #[test]
    fn init_path_and_reset_follow_the_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("multiprompt.json");
        std::env::set_var(defaults::CONFIG_ENV, &file);

        let (output, _) = path().unwrap();
        assert_eq!(output.path.as_deref(), Some(file.display().to_string().as_str()));
        assert_eq!(output.exists, Some(false));

        let (output, _) = init().unwrap();
        assert_eq!(output.command, "config.init");
        assert!(file.exists());
        assert_eq!(path().unwrap().0.exists, Some(true));

        assert_eq!(reset().unwrap().0.deleted, Some(true));
        assert_eq!(reset().unwrap().0.deleted, Some(false));
        assert!(!file.exists());

        std::env::remove_var(defaults::CONFIG_ENV);
    }
}
