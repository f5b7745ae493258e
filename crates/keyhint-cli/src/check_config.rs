use anyhow::Result;
use clap::Parser;
use keyhint::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CheckConfigCommand {
    /// Path to the configuration file
    pub(crate) path: PathBuf,
}

impl CheckConfigCommand {
    pub(crate) fn run(self) -> Result<()> {
        let config = Config::load(&self.path)?;

        println!("{}: ok", self.path.display());
        println!("  min_selectivity   = {}", config.min_selectivity);
        println!("  sample_cap        = {}", config.sample_cap);
        println!("  icp_compatible    = {}", config.icp_compatible);
        println!("  index_name_prefix = {:?}", config.index_name_prefix);

        Ok(())
    }
}
