use crate::args;
use crate::error::Result;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints the validated config
    Config {
        #[command(flatten)]
        site: args::SiteArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { site } => {
                let site = site.load_site()?;
                println!("{}", site.config());
            }
        }

        Ok(())
    }
}
