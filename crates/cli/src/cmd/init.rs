use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use crate::{config::Config, error::Error, file::save_config};

#[derive(Parser, Clone, Debug, Default, PartialEq)]
pub struct InitCmd {
    /// Where to write the configuration file
    #[arg(long, value_name = "FILE", default_value = "bluewater.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub overwrite: bool,
}

impl InitCmd {
    pub fn run(&self) -> Result<(), Error> {
        if self.output.exists() {
            if !self.overwrite {
                return Err(Error::FileExists(self.output.clone()));
            }
            warn!(file = %self.output.display(), "Overwriting existing configuration file");
        }

        save_config(&self.output, &Config::default())?;
        info!(file = %self.output.display(), "Wrote default configuration");
        Ok(())
    }
}
