//! Container identifiers and file names
//!
//! Both types are only constructed through validation, so a value of either
//! type can always be joined to a path without leaving the container root.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use uuid::Uuid;

use super::error::{ContainerError, Result};

/// Opaque container identifier (random UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(Uuid);

impl ContainerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Directory name of this container under the data directory
    pub fn dir_name(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl FromStr for ContainerId {
    type Err = ContainerError;

    /// Only the lowercase hyphenated form names a container. Other spellings
    /// of the same UUID (uppercase, braced, URN, simple) are unknown ids.
    fn from_str(s: &str) -> Result<Self> {
        match Uuid::parse_str(s) {
            Ok(uuid) if uuid.hyphenated().to_string() == s => Ok(Self(uuid)),
            _ => Err(ContainerError::ContainerNotFound(s.to_string())),
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A file name that is a single plain path component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(ContainerError::invalid_name(name, "name is empty"));
        }
        if name.contains('\0') {
            return Err(ContainerError::invalid_name(name, "name contains a NUL byte"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ContainerError::invalid_name(name, "name contains a path separator"));
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(Self(name.to_string())),
            _ => Err(ContainerError::invalid_name(
                name,
                "name must not refer to a parent or current directory",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
