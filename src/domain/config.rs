use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

/// Configuration for a gradebook session.
///
/// Controls how the roster is bounded and where reports are exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Maximum number of students the roster can hold.
    ///
    /// `None` means the roster grows without bound.
    capacity: Option<NonZeroUsize>,

    /// Whether adding a student whose roll number is already present is
    /// rejected.
    ///
    /// Binary search only gives meaningful answers when roll numbers are
    /// unique.
    pub enforce_unique_rolls: bool,

    /// Where exported reports are written.
    pub export_path: PathBuf,

    /// The format exported reports are written in.
    pub export_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: None,
            enforce_unique_rolls: true,
            export_path: default_export_path(),
            export_format: ReportFormat::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, falling back to the defaults if the file is
    /// missing.
    ///
    /// A file that exists but cannot be read or parsed also yields the
    /// defaults, with a warning.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the roster capacity, if bounded.
    #[must_use]
    pub const fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Bounds the roster to `capacity` students, or removes the bound.
    pub const fn set_capacity(&mut self, capacity: Option<NonZeroUsize>) {
        self.capacity = capacity;
    }
}

fn default_export_path() -> PathBuf {
    PathBuf::from("student_report.txt")
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// Roster capacity. Omitted means unbounded.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        capacity: Option<NonZeroUsize>,

        #[serde(default = "default_true")]
        enforce_unique_rolls: bool,

        #[serde(default = "default_export_path")]
        export_path: PathBuf,

        #[serde(default)]
        export_format: ReportFormat,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                capacity,
                enforce_unique_rolls,
                export_path,
                export_format,
            } => Self {
                capacity,
                enforce_unique_rolls,
                export_path,
                export_format,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            capacity: config.capacity,
            enforce_unique_rolls: config.enforce_unique_rolls,
            export_path: config.export_path,
            export_format: config.export_format,
        }
    }
}
