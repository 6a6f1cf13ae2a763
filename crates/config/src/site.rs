use std::collections::BTreeMap;
use std::fmt;
use std::path;

use crate::value::{map_from_yaml, map_key, untag};
use crate::{ConfigDocument, Error, Expected, Kind, Map, Result, SchemaError, Value};

const KNOWN_KEYS: &[&str] = &["title", "rootUrl", "description", "image", "redirects", "data"];

/// A site's validated configuration.
///
/// Only [`SiteConfig::from_file`] and [`SiteConfig::from_document`] create one, and
/// nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    title: String,
    root_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    redirects: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    data: Map,
}

impl SiteConfig {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Self> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Self> {
        let document = ConfigDocument::from_file(path)?;
        Self::from_document(&document).map_err(|source| Error::Schema {
            path: document.path().to_owned(),
            source,
        })
    }

    /// Validate a parsed document.
    ///
    /// `title` is checked before `rootUrl`, then the optional fields in table
    /// order, so the first problem found is always the same one. An empty
    /// `title` is rejected; nothing is trimmed.
    pub fn from_document(document: &ConfigDocument) -> Result<Self, SchemaError> {
        let root = match untag(document.root()) {
            serde_yaml::Value::Mapping(root) => root,
            other => {
                return Err(SchemaError::RootNotAMapping {
                    found: Kind::of_yaml(other),
                });
            }
        };

        let title = required_str(root, "title")?;
        if title.is_empty() {
            return Err(SchemaError::EmptyField { field: "title" });
        }
        let root_url = required_str(root, "rootUrl")?;
        let description = optional_str(root, "description")?;
        let image = optional_str(root, "image")?;
        let redirects = redirects(root)?;
        let data = data(root)?;

        for (key, _) in root {
            match key.as_str() {
                Some(key) if KNOWN_KEYS.contains(&key) => {}
                _ => log::warn!(
                    "Ignoring unknown key `{}` in `{}`",
                    key_text(key),
                    document.path().display()
                ),
            }
        }

        Ok(Self {
            title,
            root_url,
            description,
            image,
            redirects,
            data,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The site's base URL, exactly as written.
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Site-relative source paths mapped to destination URLs.
    pub fn redirects(&self) -> &BTreeMap<String, String> {
        &self.redirects
    }

    pub fn data(&self) -> &Map {
        &self.data
    }

    pub fn data_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// `data.<key>` as a string, `None` when it is absent.
    pub fn data_str(&self, key: &str) -> Result<Option<&str>, SchemaError> {
        self.data_value(key)
            .map(|value| value.expect_str(&format!("data.{key}")))
            .transpose()
    }
}

impl fmt::Display for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", converted.trim_end())
    }
}

fn required_str(root: &serde_yaml::Mapping, field: &'static str) -> Result<String, SchemaError> {
    let value = root
        .get(field)
        .ok_or(SchemaError::MissingRequiredField { field })?;
    string(value, field)
}

fn optional_str(
    root: &serde_yaml::Mapping,
    field: &'static str,
) -> Result<Option<String>, SchemaError> {
    root.get(field).map(|value| string(value, field)).transpose()
}

fn string(value: &serde_yaml::Value, field: &str) -> Result<String, SchemaError> {
    match untag(value) {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        other => Err(SchemaError::wrong_type(
            field,
            Expected::String,
            Kind::of_yaml(other),
        )),
    }
}

fn redirects(root: &serde_yaml::Mapping) -> Result<BTreeMap<String, String>, SchemaError> {
    const FIELD: &str = "redirects";

    let Some(value) = root.get(FIELD) else {
        return Ok(BTreeMap::new());
    };
    let mapping = match untag(value) {
        serde_yaml::Value::Mapping(mapping) => mapping,
        other => {
            return Err(SchemaError::wrong_type(
                FIELD,
                Expected::StringMap,
                Kind::of_yaml(other),
            ));
        }
    };

    let mut redirects = BTreeMap::new();
    for (from, to) in mapping {
        let from = map_key(from, FIELD)?;
        let to = match untag(to) {
            serde_yaml::Value::String(to) => to.clone(),
            other => {
                return Err(SchemaError::wrong_type(
                    FIELD,
                    Expected::StringMap,
                    Kind::of_yaml(other),
                ));
            }
        };
        if redirects.contains_key(&from) {
            return Err(SchemaError::DuplicateKey {
                field: FIELD.to_owned(),
                key: from,
            });
        }
        redirects.insert(from, to);
    }
    Ok(redirects)
}

fn data(root: &serde_yaml::Mapping) -> Result<Map, SchemaError> {
    const FIELD: &str = "data";

    match root.get(FIELD).map(untag) {
        None => Ok(Map::new()),
        Some(serde_yaml::Value::Mapping(mapping)) => map_from_yaml(mapping, FIELD),
        Some(other) => Err(SchemaError::wrong_type(
            FIELD,
            Expected::Mapping,
            Kind::of_yaml(other),
        )),
    }
}

fn key_text(key: &serde_yaml::Value) -> String {
    match untag(key) {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(content: &str) -> Result<SiteConfig, SchemaError> {
        let document = ConfigDocument::parse("config.yaml", content).unwrap();
        SiteConfig::from_document(&document)
    }

    fn words() -> Value {
        Value::Sequence(vec!["banana".into(), "happy".into(), "explosion".into()])
    }

    #[test]
    fn test_from_file_full() {
        let config = SiteConfig::from_file("tests/fixtures/config/full.yaml").unwrap();
        assert_eq!(config.title(), "My Site");
        assert_eq!(config.root_url(), "https://example.org");
        assert_eq!(config.description(), Some("This is my Brage site."));
        assert_eq!(config.image(), Some("dog.png"));

        let mut redirects = BTreeMap::new();
        redirects.insert("/example".to_owned(), "https://example.org/".to_owned());
        assert_eq!(config.redirects(), &redirects);

        assert_eq!(config.data().len(), 1);
        assert_eq!(config.data_value("words"), Some(&words()));
    }

    #[test]
    fn test_from_file_minimal() {
        let config = SiteConfig::from_file("tests/fixtures/config/minimal.yaml").unwrap();
        assert_eq!(config.title(), "My Site");
        assert_eq!(config.root_url(), "https://example.org");
        assert_eq!(config.description(), None);
        assert_eq!(config.image(), None);
        assert!(config.redirects().is_empty());
        assert!(config.data().is_empty());
    }

    #[test]
    fn test_from_file_nested_data() {
        let config = SiteConfig::from_file("tests/fixtures/config/nested_data.yaml").unwrap();
        let social = config.data_value("social").unwrap();
        assert_eq!(
            social.get("instagram").and_then(Value::as_str),
            Some("https://www.instagram.com/youngfatigue/")
        );
        let quotes = config
            .data_value("quotes")
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(
            quotes,
            &[
                Value::from("It’s actually really good... really good."),
                Value::from("[Dislocation] is super fun!"),
            ]
        );
        let releases = config
            .data_value("releases")
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(
            releases[0].get("tracks").and_then(Value::as_sequence).map(|tracks| tracks.len()),
            Some(3)
        );
        assert_eq!(
            releases[1].get("year").and_then(Value::as_integer),
            Some(2021)
        );
    }

    #[test]
    fn test_from_file_not_found() {
        let err = SiteConfig::from_file("tests/fixtures/config/config_does_not_exist.yaml")
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err:?}");
    }

    #[test]
    fn test_from_file_invalid_syntax() {
        let err = SiteConfig::from_file("tests/fixtures/config/invalid_syntax.yaml").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_from_file_missing_title() {
        let err = SiteConfig::from_file("tests/fixtures/config/missing_title.yaml").unwrap_err();
        assert_eq!(
            err.path(),
            path::Path::new("tests/fixtures/config/missing_title.yaml")
        );
        assert_eq!(
            err.schema(),
            Some(&SchemaError::MissingRequiredField { field: "title" })
        );
    }

    #[test]
    fn test_from_file_empty() {
        let err = SiteConfig::from_file("tests/fixtures/config/empty.yaml").unwrap_err();
        assert_eq!(
            err.schema(),
            Some(&SchemaError::RootNotAMapping { found: Kind::Nil })
        );
    }

    #[test]
    fn values_are_not_normalized() {
        let config = parse("title: '  My Site  '\nrootUrl: 'https://example.org/ '\n").unwrap();
        assert_eq!(config.title(), "  My Site  ");
        assert_eq!(config.root_url(), "https://example.org/ ");
    }

    #[test]
    fn missing_root_url() {
        let err = parse("title: My Site\n").unwrap_err();
        assert_eq!(err, SchemaError::MissingRequiredField { field: "rootUrl" });
    }

    #[test]
    fn empty_title() {
        let err = parse("title: ''\nrootUrl: https://example.org\n").unwrap_err();
        assert_eq!(err, SchemaError::EmptyField { field: "title" });
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn empty_title_reported_before_missing_root_url() {
        let err = parse("title: \"\"\n").unwrap_err();
        assert_eq!(err, SchemaError::EmptyField { field: "title" });
    }

    #[test]
    fn whitespace_title_is_kept() {
        let config = parse("title: ' '\nrootUrl: https://example.org\n").unwrap();
        assert_eq!(config.title(), " ");
    }

    #[test]
    fn missing_both_reports_title() {
        let err = parse("description: Nothing else\n").unwrap_err();
        assert_eq!(err, SchemaError::MissingRequiredField { field: "title" });
    }

    #[test]
    fn title_wrong_type() {
        let err = parse("title: [My, Site]\nrootUrl: https://example.org\n").unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "title".into(),
                expected: Expected::String,
                found: Kind::Sequence,
            }
        );
    }

    #[test]
    fn numbers_are_not_strings() {
        let err = parse("title: 1984\nrootUrl: https://example.org\n").unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "title".into(),
                expected: Expected::String,
                found: Kind::Integer,
            }
        );
    }

    #[test]
    fn null_is_not_absent() {
        let err = parse("title: My Site\nrootUrl: ~\n").unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "rootUrl".into(),
                expected: Expected::String,
                found: Kind::Nil,
            }
        );

        let err = parse("title: My Site\nrootUrl: https://example.org\ndescription:\n")
            .unwrap_err();
        assert_eq!(err.field(), Some("description"));
    }

    #[test]
    fn optional_fields_wrong_type() {
        let err = parse("title: My Site\nrootUrl: https://example.org\ndescription: {a: b}\n")
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "description".into(),
                expected: Expected::String,
                found: Kind::Mapping,
            }
        );

        let err = parse("title: My Site\nrootUrl: https://example.org\nimage: true\n").unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "image".into(),
                expected: Expected::String,
                found: Kind::Bool,
            }
        );
    }

    #[test]
    fn each_optional_field_can_be_omitted() {
        let full = "\
title: My Site
rootUrl: https://example.org
description: This is my Brage site.
image: dog.png
redirects:
  /example: https://example.org/
data:
  words: [banana, happy, explosion]
";
        let expected = parse(full).unwrap();
        for omitted in ["description", "image", "redirects", "data"] {
            let content = remove_key(full, omitted);
            let config = parse(&content).unwrap();

            assert_eq!(config.title(), expected.title());
            assert_eq!(config.root_url(), expected.root_url());
            match omitted {
                "description" => assert_eq!(config.description(), None),
                _ => assert_eq!(config.description(), expected.description()),
            }
            match omitted {
                "image" => assert_eq!(config.image(), None),
                _ => assert_eq!(config.image(), expected.image()),
            }
            match omitted {
                "redirects" => assert!(config.redirects().is_empty()),
                _ => assert_eq!(config.redirects(), expected.redirects()),
            }
            match omitted {
                "data" => assert!(config.data().is_empty()),
                _ => assert_eq!(config.data(), expected.data()),
            }
        }
    }

    /// Drop a top-level key along with its indented block.
    fn remove_key(content: &str, key: &str) -> String {
        let prefix = format!("{key}:");
        let mut skipping = false;
        let mut kept = String::new();
        for line in content.lines() {
            if line.starts_with(&prefix) {
                skipping = true;
                continue;
            }
            if skipping && line.starts_with(' ') {
                continue;
            }
            skipping = false;
            kept.push_str(line);
            kept.push('\n');
        }
        kept
    }

    #[test]
    fn redirects_non_string_value() {
        let err = parse("title: My Site\nrootUrl: https://example.org\nredirects:\n  /old: 3\n")
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "redirects".into(),
                expected: Expected::StringMap,
                found: Kind::Integer,
            }
        );
    }

    #[test]
    fn redirects_not_a_mapping() {
        let err = parse("title: My Site\nrootUrl: https://example.org\nredirects: [/old, /new]\n")
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "redirects".into(),
                expected: Expected::StringMap,
                found: Kind::Sequence,
            }
        );
    }

    #[test]
    fn redirects_numeric_source() {
        let config =
            parse("title: My Site\nrootUrl: https://example.org\nredirects:\n  404: /not-found\n")
                .unwrap();
        assert_eq!(
            config.redirects().get("404").map(String::as_str),
            Some("/not-found")
        );
    }

    #[test]
    fn redirects_colliding_sources() {
        let err = parse(
            "title: My Site\nrootUrl: https://example.org\nredirects:\n  404: /a\n  '404': /b\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateKey {
                field: "redirects".into(),
                key: "404".into(),
            }
        );
    }

    #[test]
    fn data_not_a_mapping() {
        let err = parse("title: My Site\nrootUrl: https://example.org\ndata: [a, b]\n").unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "data".into(),
                expected: Expected::Mapping,
                found: Kind::Sequence,
            }
        );
    }

    #[test]
    fn root_not_a_mapping() {
        let err = parse("- title\n- rootUrl\n").unwrap_err();
        assert_eq!(err, SchemaError::RootNotAMapping { found: Kind::Sequence });

        let err = parse("My Site").unwrap_err();
        assert_eq!(err, SchemaError::RootNotAMapping { found: Kind::String });
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = parse("title: My Site\nrootUrl: https://example.org\nauthor: Me\n").unwrap();
        assert_eq!(config.title(), "My Site");
        assert!(config.data().is_empty());
    }

    #[test]
    fn data_str_accessor() {
        let config = parse(
            "title: My Site\nrootUrl: https://example.org\ndata:\n  instagram: https://instagram.com/x\n  words: [a]\n",
        )
        .unwrap();
        assert_eq!(
            config.data_str("instagram"),
            Ok(Some("https://instagram.com/x"))
        );
        assert_eq!(config.data_str("missing"), Ok(None));
        assert_eq!(
            config.data_str("words"),
            Err(SchemaError::WrongType {
                field: "data.words".into(),
                expected: Expected::String,
                found: Kind::Sequence,
            })
        );
    }

    #[test]
    fn display_is_yaml() {
        let config = parse(
            "title: My Site\nrootUrl: https://example.org\ndata:\n  words: [banana, happy, explosion]\n",
        )
        .unwrap();
        let reparsed = parse(&config.to_string()).unwrap();
        assert_eq!(reparsed, config);
        assert!(config.to_string().starts_with("title: My Site\n"));
        assert_eq!(reparsed.data_value("words"), Some(&words()));
    }
}
