//! Column enumeration codegen.
//!
//! One closed enum per table, one variant per column in declaration order,
//! implementing `::rowgen::core::model::TableColumn`.

use crate::Error;
use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use rowgen_core::model::TableModel;

// keywords that cannot name an item or variant
const RESERVED: &[&str] = &[
    "Self", "_", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

///
/// ColumnEnum
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnEnum {
    pub ident: String,
    pub tokens: String,
}

impl ColumnEnum {
    /// File name the enum is written to under the output directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.ident.to_case(Case::Snake))
    }
}

/// Ensure a generated identifier is a plain ASCII Rust ident and not a
/// keyword.
pub(crate) fn validate_ident(ident: &str) -> Result<(), String> {
    let mut chars = ident.chars();
    let Some(first) = chars.next() else {
        return Err("ident is empty".to_string());
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!("ident '{ident}' must start with a letter or '_'"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("ident '{ident}' must be ASCII alphanumeric"));
    }
    if RESERVED.contains(&ident) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

fn ident(table: &str, name: &str) -> Result<Ident, Error> {
    validate_ident(name).map_err(|reason| Error::InvalidIdent {
        table: table.to_string(),
        reason,
    })?;

    Ok(Ident::new(name, Span::call_site()))
}

/// Generate the column enum for one table.
pub fn generate(model: &TableModel, enum_ident: &str) -> Result<ColumnEnum, Error> {
    let table = model.name();
    let enum_name = ident(table, enum_ident)?;

    let mut variants: Vec<Ident> = Vec::with_capacity(model.len());
    for (_, column) in model.iter() {
        let variant = ident(table, &column.name.to_case(Case::Pascal))?;
        if variants.contains(&variant) {
            return Err(Error::InvalidIdent {
                table: table.to_string(),
                reason: format!("column '{}' maps to duplicate variant '{variant}'", column.name),
            });
        }
        variants.push(variant);
    }

    let names = model.columns().iter().map(|c| c.name.as_str());
    let sql_names = model.columns().iter().map(|c| c.sql_name.as_str());
    let ordinals = 0..model.len();
    let doc = format!(" Columns of table `{table}`.");

    let name_arms = variants.iter().zip(names).map(|(v, n)| quote!(Self::#v => #n));
    let sql_arms = variants
        .iter()
        .zip(sql_names)
        .map(|(v, n)| quote!(Self::#v => #n));
    let ordinal_arms = variants
        .iter()
        .zip(ordinals)
        .map(|(v, o)| quote!(Self::#v => #o));

    let tokens: TokenStream = quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum #enum_name {
            #(#variants),*
        }

        impl ::rowgen::core::model::TableColumn for #enum_name {
            const TABLE: &'static str = #table;
            const ALL: &'static [Self] = &[#(Self::#variants),*];

            fn ordinal(self) -> usize {
                match self {
                    #(#ordinal_arms),*
                }
            }

            fn name(self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            fn sql_name(self) -> &'static str {
                match self {
                    #(#sql_arms),*
                }
            }
        }
    };

    tracing::debug!(table, ident = enum_ident, "generated column enum");

    Ok(ColumnEnum {
        ident: enum_ident.to_string(),
        tokens: tokens.to_string(),
    })
}
