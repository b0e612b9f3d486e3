//! Generator configuration.
//!
//! Loaded from TOML. Table metadata stands in for schema introspection;
//! the plugin list mirrors the host generator's plugin chain, in order.

use convert_case::{Case, Casing};
use rowgen_core::{
    error::ModelError,
    model::{Column, ColumnKind, Role, TableModel},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Default values for configuration
mod defaults {
    pub const fn renders_null_as_literal() -> bool {
        true
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,

    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded generator config");

        Self::from_toml_str(&text)
    }
}

///
/// PluginConfig
///
/// One entry of the plugin chain. `name` is either the simple plugin name
/// (`UpsertPlugin`) or a fully qualified one ending in it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    pub name: String,
}

///
/// TableConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub name: String,

    /// Ident of the generated column enum; defaults to `<Table>Column`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_enum: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

impl TableConfig {
    #[must_use]
    pub fn column_enum_ident(&self) -> String {
        self.column_enum
            .clone()
            .unwrap_or_else(|| format!("{}Column", self.name.to_case(Case::Pascal)))
    }

    /// Build the runtime column model, in declaration order.
    pub fn to_model(&self) -> Result<TableModel, ModelError> {
        let columns = self.columns.iter().map(ColumnConfig::to_column).collect();

        TableModel::new(self.name.clone(), columns)
    }
}

///
/// ColumnConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    pub sql_name: String,

    /// Record field name; defaults to the camelCase of `sql_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub kind: ColumnKind,

    #[serde(default)]
    pub role: Role,

    #[serde(default = "defaults::renders_null_as_literal")]
    pub renders_null_as_literal: bool,
}

impl ColumnConfig {
    #[must_use]
    pub fn field_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.sql_name.to_case(Case::Camel))
    }

    #[must_use]
    pub fn to_column(&self) -> Column {
        Column::new(self.field_name(), self.sql_name.clone(), self.kind)
            .with_role(self.role)
            .with_null_literal(self.renders_null_as_literal)
    }
}
