use crate::{config::PluginConfig, diagnostics::Diagnostics};
use derive_more::Display;
use std::collections::BTreeSet;

///
/// PluginKind
///
/// Plugins rowgen reacts to. Anything else is carried through as `Other`.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PluginKind {
    #[display("ModelColumnPlugin")]
    ModelColumn,
    #[display("SelectiveEnhancedPlugin")]
    SelectiveEnhanced,
    #[display("UpsertPlugin")]
    Upsert,
    #[display("{_0}")]
    Other(String),
}

impl PluginKind {
    /// Parse a simple (`UpsertPlugin`) or qualified (`a.b.UpsertPlugin`,
    /// `a::b::UpsertPlugin`) plugin name.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let simple = name
            .rsplit(['.', ':'])
            .next()
            .unwrap_or(name)
            .trim();

        match simple {
            "ModelColumnPlugin" => Self::ModelColumn,
            "SelectiveEnhancedPlugin" => Self::SelectiveEnhanced,
            "UpsertPlugin" => Self::Upsert,
            _ => Self::Other(name.trim().to_string()),
        }
    }
}

///
/// PluginChain
///
/// Registered plugins in configuration order, duplicates removed.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PluginChain {
    plugins: Vec<PluginKind>,
}

impl PluginChain {
    /// Build the chain; a repeated entry is reported and the later one
    /// ignored.
    pub fn from_config(configs: &[PluginConfig], diagnostics: &mut Diagnostics) -> Self {
        let mut seen = BTreeSet::new();
        let mut plugins = Vec::with_capacity(configs.len());

        for config in configs {
            let kind = PluginKind::parse(&config.name);
            if seen.insert(kind.clone()) {
                plugins.push(kind);
            } else {
                diagnostics.warn(format!(
                    "rowgen: plugin {kind} is configured more than once; the later entry is ignored"
                ));
            }
        }

        Self { plugins }
    }

    #[must_use]
    pub fn contains(&self, kind: &PluginKind) -> bool {
        self.plugins.contains(kind)
    }

    #[must_use]
    pub fn position(&self, kind: &PluginKind) -> Option<usize> {
        self.plugins.iter().position(|k| k == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginKind> {
        self.plugins.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for PluginChain {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let configs: Vec<_> = iter
            .into_iter()
            .map(|name| PluginConfig {
                name: name.to_string(),
            })
            .collect();

        Self::from_config(&configs, &mut Diagnostics::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_and_qualified_names() {
        assert_eq!(PluginKind::parse("UpsertPlugin"), PluginKind::Upsert);
        assert_eq!(
            PluginKind::parse("org.example.codegen.plugins.SelectiveEnhancedPlugin"),
            PluginKind::SelectiveEnhanced
        );
        assert_eq!(
            PluginKind::parse("rowgen::ModelColumnPlugin"),
            PluginKind::ModelColumn
        );
        assert_eq!(
            PluginKind::parse("LimitPlugin"),
            PluginKind::Other("LimitPlugin".to_string())
        );
    }

    #[test]
    fn duplicates_are_reported_once_and_dropped() {
        let configs: Vec<_> = ["UpsertPlugin", "LimitPlugin", "x.UpsertPlugin"]
            .into_iter()
            .map(|name| PluginConfig {
                name: name.to_string(),
            })
            .collect();
        let mut diagnostics = Diagnostics::default();

        let chain = PluginChain::from_config(&configs, &mut diagnostics);

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.position(&PluginKind::Upsert), Some(0));
        assert_eq!(diagnostics.warnings().len(), 1);
        assert!(diagnostics.warnings()[0].contains("UpsertPlugin"));
    }

    #[test]
    fn unknown_plugins_are_kept_in_order() {
        let chain: PluginChain = ["LimitPlugin", "ModelColumnPlugin"].into_iter().collect();
        let names: Vec<_> = chain.iter().map(ToString::to_string).collect();

        assert_eq!(names, ["LimitPlugin", "ModelColumnPlugin"]);
    }
}
