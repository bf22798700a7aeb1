//! Config command - manage persisted settings

use crate::{ScourError, cli::ConfigCommands, config::ScourConfig};

type Result<T> = std::result::Result<T, ScourError>;

/// Execute the config command
///
/// # Errors
/// Returns an error for unknown keys, unparsable values, or when the
/// configuration cannot be saved.
pub fn execute(mut config: ScourConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let Some((key, value)) = setting.split_once('=') else {
                return Err(ScourError::InvalidInput(
                    "Invalid format. Use: scour config set key=value".into(),
                ));
            };

            let normalized = config.set(key.trim(), value.trim())?;
            config.save()?;
            if !quiet {
                println!("Set {} = {normalized}", key.trim());
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key)?);
        }
    }
    Ok(())
}
