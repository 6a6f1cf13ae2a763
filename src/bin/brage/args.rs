use std::path;

use anyhow::Context as _;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct SiteArgs {
    /// Site source directory [default: nearest directory with a `config.yaml`]
    #[arg(value_name = "SITE_PATH")]
    pub(crate) site_path: Option<path::PathBuf>,
}

impl SiteArgs {
    pub(crate) fn load_site(&self) -> Result<brage::Site> {
        let site = if let Some(site_path) = self.site_path.as_deref() {
            log::debug!("Loading site from `{}`", display_path(site_path).display());
            brage::Site::load(site_path)?
        } else {
            let cwd = std::env::current_dir().context("failed to read the current directory")?;
            brage::Site::from_cwd(cwd)?
        };
        Ok(site)
    }
}

/// Absolute form of `path` for messages, falling back to `path` as given.
pub(crate) fn display_path(path: &path::Path) -> path::PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_owned())
}
