//! Placeholder substitution over paragraph-structured templates.
//!
//! A placeholder is `[FIELD_NAME]`, the upper-cased form of a field key.
//! Placeholders are resolved by literal substring replacement; tokens with
//! no matching field are left in place.

mod substitutor;

pub use substitutor::{
    unresolved_placeholders, TemplateSubstitutor, DEFAULT_PRIORITY_FIELDS, DEFAULT_REQUIRED_FIELDS,
};
