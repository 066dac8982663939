use anyhow::Result;

use tidybuild::Config;

pub fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml());
    Ok(())
}
