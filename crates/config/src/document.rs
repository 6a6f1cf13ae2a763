use std::path;

use crate::Error;
use crate::Result;

/// A configuration file as parsed YAML, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    path: path::PathBuf,
    root: serde_yaml::Value,
}

impl ConfigDocument {
    /// Read and parse `path`. Every call goes back to the filesystem.
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Self> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Self> {
        log::debug!("Reading config `{}`", path.display());
        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(source) => return Err(Error::Io { path, source }),
        };
        Self::parse_internal(path, &content)
    }

    /// Parse `content` as if it had been read from `path`.
    pub fn parse<P: Into<path::PathBuf>, C: AsRef<[u8]>>(path: P, content: C) -> Result<Self> {
        Self::parse_internal(path.into(), content.as_ref())
    }

    fn parse_internal(path: path::PathBuf, content: &[u8]) -> Result<Self> {
        let root = if content.iter().all(u8::is_ascii_whitespace) {
            log::trace!("`{}` is blank", path.display());
            serde_yaml::Value::Null
        } else {
            match serde_yaml::from_slice(content) {
                Ok(root) => root,
                Err(source) => return Err(Error::Parse { path, source }),
            }
        };
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &path::Path {
        &self.path
    }

    pub fn root(&self) -> &serde_yaml::Value {
        &self.root
    }
}
