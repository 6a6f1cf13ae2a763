use crate::args;
use crate::error::{Result, not_implemented};

/// Build and serve the site at SITE_PATH
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ServeArgs {
    #[command(flatten)]
    pub(crate) site: args::SiteArgs,

    /// Port to serve from
    #[arg(short, long, value_name = "NUM", default_value_t = 8080)]
    pub(crate) port: u16,
}

impl ServeArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let site = self.site.load_site()?;
        log::info!("Serving `{}` on port {}", site.config().title(), self.port);

        Err(not_implemented("serve"))
    }
}
