use std::path;

use crate::error::{Result, not_implemented};

/// Create a new site at TARGET_PATH
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct NewArgs {
    /// Directory to create the site in
    #[arg(value_name = "TARGET_PATH")]
    pub(crate) target_path: path::PathBuf,

    /// Overwrite an existing `config.yaml`
    #[arg(short, long)]
    pub(crate) force: bool,
}

impl NewArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config_path = self.target_path.join(brage::CONFIG_FILE);
        if config_path.exists() && !self.force {
            anyhow::bail!(
                "`{}` already contains {}, pass --force to overwrite",
                self.target_path.display(),
                brage::CONFIG_FILE
            );
        }
        log::debug!("Creating site in `{}`", self.target_path.display());

        Err(not_implemented("new"))
    }
}
