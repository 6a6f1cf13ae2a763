//! Loading and validation of a brage site's `config.yaml`.
//!
//! [`ConfigDocument`] is the raw YAML tree read from disk. [`SiteConfig`] is the
//! validated, immutable configuration built from it, with free-form site data
//! kept as [`Value`]s.

mod document;
mod error;
mod site;
mod value;

pub use self::document::*;
pub use self::error::*;
pub use self::site::*;
pub use self::value::*;

type Result<T, E = Error> = std::result::Result<T, E>;
