use std::path;

use crate::args;
use crate::error::{Result, not_implemented};

/// Build the site at SITE_PATH
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub(crate) site: args::SiteArgs,

    /// Output directory [default: SITE_PATH/build]
    #[arg(short, long, value_name = "DIR")]
    pub(crate) output: Option<path::PathBuf>,

    /// Remove the output directory before building
    #[arg(short, long)]
    pub(crate) clean: bool,
}

impl BuildArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let site = self.site.load_site()?;
        let destination = self
            .output
            .clone()
            .unwrap_or_else(|| site.root().join("build"));

        log::info!(
            "Building `{}` into {}",
            site.config().title(),
            args::display_path(&destination).display()
        );
        if self.clean {
            log::debug!("Cleaning {}", destination.display());
        }

        Err(not_implemented("build"))
    }
}
