use clap::Subcommand;
use focusblock_core::error::Result;
use focusblock_core::storage::Config;
use focusblock_core::ConfigError;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration keys and values
    List,
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let cfg = Config::load_or_default();
            match cfg.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(ConfigError::UnknownKey(key).into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = Config::load_or_default();
            cfg.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let cfg = Config::load_or_default();
            for (key, value) in cfg.entries() {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}
