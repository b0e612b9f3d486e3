//! Plugin wiring checks.
//!
//! Wiring problems never fail generation. Each one is logged and kept, and
//! the pass continues with degraded selective support.

use crate::plugin::{PluginChain, PluginKind};
use rowgen_core::runtime::SelectivePolicy;

pub const MISSING_MODEL_COLUMN: &str = "rowgen: plugin SelectiveEnhancedPlugin requires ModelColumnPlugin to be configured; selective statements fall back to presence semantics";

pub const UPSERT_AFTER_SELECTIVE: &str = "rowgen: plugin SelectiveEnhancedPlugin should be configured after UpsertPlugin, otherwise upsert statements may not be enhanced";

///
/// Diagnostics
///
/// Append-only list of warnings raised during one generation pass.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");

        self.warnings.push(message);
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Check the plugin chain and return the selective policy every table
    /// is prepared with.
    pub fn check_plugin_chain(&mut self, chain: &PluginChain) -> SelectivePolicy {
        let Some(selective) = chain.position(&PluginKind::SelectiveEnhanced) else {
            return SelectivePolicy::PRESENCE_ONLY;
        };

        if !chain.contains(&PluginKind::ModelColumn) {
            self.warn(MISSING_MODEL_COLUMN);

            return SelectivePolicy::PRESENCE_ONLY;
        }

        let mut policy = SelectivePolicy::ENHANCED;
        if let Some(upsert) = chain.position(&PluginKind::Upsert)
            && upsert > selective
        {
            self.warn(UPSERT_AFTER_SELECTIVE);
            policy.honor_selection_in_upserts = false;
        }

        policy
    }
}
