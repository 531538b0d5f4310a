use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::settings::IndicatorOption;

const DEFAULT_SCOPE: &str = "default";
const STORES_SCOPE: &str = "stores";

/// Store code a configuration lookup is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoreCode(pub String);

impl StoreCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The scope every store falls back to.
    pub fn default_scope() -> Self {
        Self(DEFAULT_SCOPE.to_string())
    }

}

impl fmt::Display for StoreCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keyed lookup into wherever store configuration is persisted.
pub trait ConfigSource: Send + Sync {
    fn get(&self, store: &StoreCode, path: &str) -> Result<Option<String>, ConfigSourceError>;
}

/// Error enumeration for configuration backends.
#[derive(Debug, thiserror::Error)]
pub enum ConfigSourceError {
    #[error("configuration source unavailable: {0}")]
    Unavailable(String),
}

/// One store's view of the configuration source.
///
/// Blank values and backend failures both read as absent so callers only ever apply defaults.
/// Non-blank values are returned as stored; message prompts rely on their trailing space.
pub struct StoreConfigView<'a> {
    source: &'a dyn ConfigSource,
    store: StoreCode,
}

impl<'a> StoreConfigView<'a> {
    pub fn new(source: &'a dyn ConfigSource, store: StoreCode) -> Self {
        Self { source, store }
    }

    pub fn get(&self, option: IndicatorOption) -> Option<String> {
        match self.source.get(&self.store, option.path()) {
            Ok(value) => value.filter(|raw| !raw.trim().is_empty()),
            Err(err) => {
                warn!(
                    store = %self.store,
                    option = option.name(),
                    error = %err,
                    "configuration lookup failed; using default"
                );
                None
            }
        }
    }
}

/// Configuration held in memory with store-over-default precedence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigSource {
    scopes: BTreeMap<StoreCode, BTreeMap<String, String>>,
}

impl InMemoryConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, store: StoreCode, path: impl Into<String>, value: impl Into<String>) {
        self.scopes
            .entry(store)
            .or_default()
            .insert(path.into(), value.into());
    }

    pub fn set_default(&mut self, option: IndicatorOption, value: impl Into<String>) {
        self.set(StoreCode::default_scope(), option.path(), value);
    }

    pub fn set_for_store(
        &mut self,
        store: &StoreCode,
        option: IndicatorOption,
        value: impl Into<String>,
    ) {
        self.set(store.clone(), option.path(), value);
    }

    pub fn stores(&self) -> impl Iterator<Item = &StoreCode> {
        self.scopes.keys()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StoreConfigImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads a `scope,scope_code,path,value` export.
    ///
    /// Only `default` and `stores` rows are kept. Values are stored untrimmed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreConfigImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut source = Self::new();

        for record in csv_reader.deserialize::<ConfigRow>() {
            let row = record?;
            let Some(store) = row.store()? else {
                debug!(
                    scope = row.scope.trim(),
                    path = row.path.trim(),
                    "skipping row outside the default and store scopes"
                );
                continue;
            };
            let path = row.path.trim();
            if IndicatorOption::lookup(path).is_none() {
                debug!(path, "ignoring configuration path the indicator does not read");
            }
            source.set(store, path, row.value.unwrap_or_default());
        }

        Ok(source)
    }
}

impl ConfigSource for InMemoryConfigSource {
    fn get(&self, store: &StoreCode, path: &str) -> Result<Option<String>, ConfigSourceError> {
        let scoped = self
            .scopes
            .get(store)
            .and_then(|values| values.get(path))
            .filter(|value| !value.trim().is_empty());

        let value = match scoped {
            Some(value) => Some(value),
            None => self
                .scopes
                .get(&StoreCode::default_scope())
                .and_then(|values| values.get(path)),
        };

        Ok(value.cloned())
    }
}

#[derive(Debug, Deserialize)]
struct ConfigRow {
    scope: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    scope_code: Option<String>,
    path: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    value: Option<String>,
}

impl ConfigRow {
    /// `None` for scopes stores do not inherit from directly (e.g. `websites`).
    fn store(&self) -> Result<Option<StoreCode>, StoreConfigImportError> {
        let scope = self.scope.trim();
        if scope.eq_ignore_ascii_case(DEFAULT_SCOPE) {
            return Ok(Some(StoreCode::default_scope()));
        }
        if !scope.eq_ignore_ascii_case(STORES_SCOPE) {
            return Ok(None);
        }

        self.scope_code
            .as_deref()
            .map(|code| StoreCode::new(code.trim()))
            .map(Some)
            .ok_or_else(|| StoreConfigImportError::MissingScopeCode {
                path: self.path.trim().to_string(),
            })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug)]
pub enum StoreConfigImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingScopeCode { path: String },
}

impl fmt::Display for StoreConfigImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfigImportError::Io(err) => {
                write!(f, "failed to read store configuration: {}", err)
            }
            StoreConfigImportError::Csv(err) => {
                write!(f, "invalid store configuration CSV: {}", err)
            }
            StoreConfigImportError::MissingScopeCode { path } => {
                write!(f, "store-scoped value for '{}' has no scope_code", path)
            }
        }
    }
}

impl std::error::Error for StoreConfigImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreConfigImportError::Io(err) => Some(err),
            StoreConfigImportError::Csv(err) => Some(err),
            StoreConfigImportError::MissingScopeCode { .. } => None,
        }
    }
}

impl From<std::io::Error> for StoreConfigImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for StoreConfigImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
