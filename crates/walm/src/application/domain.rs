use serde::Serialize;
use std::fmt;

/// Unique identifier of an application row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Persisted shape of an application record.
///
/// Plain data with identity; how it maps to storage is the repository
/// implementation's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub name: String,
}

impl Application {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ApplicationId(id.into()),
            name: name.into(),
        }
    }

    /// Explicit mapping to the wire form. Both fields are dump-only; the
    /// facade never accepts them as writable input.
    pub fn view(&self) -> ApplicationView {
        ApplicationView {
            id: self.id.0.clone(),
            name: self.name.clone(),
        }
    }
}

/// Wire representation of an [`Application`]: `{ "id": ..., "name": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationView {
    pub id: String,
    pub name: String,
}
