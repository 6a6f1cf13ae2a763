use std::io;
use std::path;

use brage_config::{Error, SiteConfig};

/// Name of the configuration file at the root of every site.
pub const CONFIG_FILE: &str = "config.yaml";

/// A site's source directory and its loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    root: path::PathBuf,
    config: SiteConfig,
}

impl Site {
    /// Load the site whose source directory is `root`.
    pub fn load<P: Into<path::PathBuf>>(root: P) -> Result<Self, Error> {
        Self::load_internal(root.into())
    }

    fn load_internal(root: path::PathBuf) -> Result<Self, Error> {
        let metadata = match std::fs::metadata(&root) {
            Ok(metadata) => metadata,
            Err(source) => return Err(Error::Io { path: root, source }),
        };
        if !metadata.is_dir() {
            let source = io::Error::new(io::ErrorKind::NotADirectory, "not a site directory");
            return Err(Error::Io { path: root, source });
        }

        let config = SiteConfig::from_file(root.join(CONFIG_FILE))?;
        log::debug!("Loaded site `{}` from `{}`", config.title(), root.display());
        Ok(Self { root, config })
    }

    /// Load the site containing `cwd`, searching upwards for the nearest
    /// directory with a `config.yaml`.
    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Self, Error> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Self, Error> {
        let Some(file_path) = find_project_file(&cwd, CONFIG_FILE) else {
            let source = io::Error::new(
                io::ErrorKind::NotFound,
                "no config.yaml in this directory or any parent",
            );
            return Err(Error::Io {
                path: cwd.join(CONFIG_FILE),
                source,
            });
        };
        log::debug!("Using config file `{}`", file_path.display());

        let mut root = file_path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        Self::load(root)
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    pub fn config_path(&self) -> path::PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.is_file() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}
