//! A simple static site generator.
//!
//! A [`Site`] is a source directory together with the configuration loaded
//! from its `config.yaml`; loading and validating that file is handled by
//! [`brage_config`].

pub use brage_config::{Error, SchemaError, SiteConfig, Value};

mod site;

pub use crate::site::*;
