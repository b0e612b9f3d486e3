//! Generation pass for rowgen.
//!
//! Builds each table's column model from configuration, checks the plugin
//! chain, and prepares the `TableStatements` generated data-access code
//! runs against. With the model-column plugin configured it also emits the
//! closed column enum per table.

pub mod columns;
pub mod config;
pub mod diagnostics;
pub mod plugin;

mod macros;

use crate::{
    columns::ColumnEnum,
    config::{Config, ConfigError},
    diagnostics::Diagnostics,
    plugin::{PluginChain, PluginKind},
};
use rowgen_core::{
    error::ModelError,
    model::TableModel,
    resolve::StatementKind,
    runtime::{SelectivePolicy, TableStatements},
};
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error as ThisError;

/// Index file that includes every generated column enum.
pub const INDEX_FILE: &str = "rowgen_columns.rs";

///
/// Error
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("table '{table}': {reason}")]
    InvalidIdent { table: String, reason: String },

    #[error("failed to write '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("OUT_DIR is not set; rowgen::build! must run inside a build script")]
    MissingOutDir,

    #[error(transparent)]
    Model(#[from] ModelError),
}

///
/// GeneratedTable
///

#[derive(Clone, Debug)]
pub struct GeneratedTable {
    pub statements: TableStatements,
    pub column_enum: Option<ColumnEnum>,
}

impl GeneratedTable {
    #[must_use]
    pub fn name(&self) -> &str {
        self.statements.model().name()
    }
}

///
/// Generation
///
/// Result of one generation pass.
///

#[derive(Clone, Debug)]
pub struct Generation {
    tables: Vec<GeneratedTable>,
    diagnostics: Diagnostics,
}

impl Generation {
    #[must_use]
    pub fn tables(&self) -> &[GeneratedTable] {
        &self.tables
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&GeneratedTable> {
        self.tables.iter().find(|t| t.name() == name)
    }

    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        self.diagnostics.warnings()
    }

    pub fn column_enums(&self) -> impl Iterator<Item = &ColumnEnum> {
        self.tables.iter().filter_map(|t| t.column_enum.as_ref())
    }
}

/// Run one generation pass over the configuration.
pub fn generate(config: &Config) -> Result<Generation, Error> {
    let mut diagnostics = Diagnostics::default();
    let chain = PluginChain::from_config(&config.plugins, &mut diagnostics);
    let policy = diagnostics.check_plugin_chain(&chain);

    let upserts = chain.contains(&PluginKind::Upsert);
    let model_columns = chain.contains(&PluginKind::ModelColumn);

    let mut tables = Vec::with_capacity(config.tables.len());
    for table in &config.tables {
        let model = Arc::new(table.to_model()?);
        let statements = prepare(model, policy, upserts);

        let column_enum = if model_columns {
            Some(columns::generate(statements.model(), &table.column_enum_ident())?)
        } else {
            None
        };

        tables.push(GeneratedTable {
            statements,
            column_enum,
        });
    }

    tracing::info!(
        tables = tables.len(),
        plugins = chain.len(),
        warnings = diagnostics.warnings().len(),
        "rowgen generation finished"
    );

    Ok(Generation {
        tables,
        diagnostics,
    })
}

/// Load a config file, generate, and write the column enums into `out_dir`
/// together with an index file that includes them all.
pub fn emit(config_path: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Result<Generation, Error> {
    let config = Config::load(config_path)?;
    let generation = generate(&config)?;
    let out_dir = out_dir.as_ref();

    let mut index = String::new();
    for column_enum in generation.column_enums() {
        let file_name = column_enum.file_name();
        write(&out_dir.join(&file_name), &column_enum.tokens)?;

        // writing to a String cannot fail
        let _ = writeln!(
            index,
            "include!(concat!(env!(\"OUT_DIR\"), \"/{file_name}\"));"
        );
    }
    write(&out_dir.join(INDEX_FILE), &index)?;

    tracing::info!(out_dir = %out_dir.display(), "rowgen sources written");

    Ok(generation)
}

// prepare
// statement kinds follow the table's key and the registered plugins
fn prepare(model: Arc<TableModel>, policy: SelectivePolicy, upserts: bool) -> TableStatements {
    let keyed = model.primary_key().next().is_some();

    let mut kinds = vec![StatementKind::Insert, StatementKind::UpdateByCriteria];
    if keyed {
        kinds.push(StatementKind::UpdateByKey);
    }
    if upserts {
        kinds.push(StatementKind::UpsertByCriteria);
        if keyed {
            kinds.push(StatementKind::UpsertByKey);
        }
    }

    tracing::debug!(
        table = model.name(),
        ?kinds,
        ?policy,
        "prepared table statements"
    );

    TableStatements::new(model)
        .with_policy(policy)
        .with_kinds(kinds)
}

fn write(path: &Path, contents: &str) -> Result<(), Error> {
    fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
