use anyhow::Result;
use clap::Parser;
use overlay_gen::{
    config::{Cli, Config},
    generator,
};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    log::debug!("{config:?}");

    if cli.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    generator::run(&config)?;
    Ok(())
}
