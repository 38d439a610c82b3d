//! Built-in engine documents
//!
//! Every `*.json` file under `configs/` is embedded at compile time and
//! parsed once on first use.

use include_dir::{include_dir, Dir};

use crate::{
    document::{load_from_str, EngineDocument},
    ConfigError,
};

static CONFIG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/configs");

lazy_static::lazy_static! {
    static ref CATALOGUE: Result<Vec<EngineDocument>, ConfigError> = parse_catalogue();
}

fn parse_catalogue() -> Result<Vec<EngineDocument>, ConfigError> {
    let mut files: Vec<_> = CONFIG_DIR
        .files()
        .filter(|file| file.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort_by(|a, b| a.path().cmp(b.path()));

    files
        .into_iter()
        .map(|file| {
            let json = file.contents_utf8().ok_or_else(|| {
                ConfigError::Parse(format!("{} is not UTF-8", file.path().display()))
            })?;
            load_from_str(json)
        })
        .collect()
}

/// Every built-in document, sorted by file name
pub fn builtin_documents() -> Result<Vec<EngineDocument>, ConfigError> {
    CATALOGUE.clone()
}

/// Built-in document by qualified name
pub fn builtin_document(qualified_name: &str) -> Result<EngineDocument, ConfigError> {
    builtin_documents()?
        .into_iter()
        .find(|doc| doc.qualified_name() == qualified_name)
        .ok_or_else(|| ConfigError::NotFound(qualified_name.to_string()))
}

/// The six-vital respiratory risk engine, version 1
pub fn respiratory_risk_v1() -> Result<EngineDocument, ConfigError> {
    builtin_document("respiratory_risk_v1")
}
