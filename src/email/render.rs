//! `{{variable}}` placeholder substitution
//!
//! Substitution is literal text replacement. Placeholders without a
//! matching variable are left untouched, and variables without a matching
//! placeholder are ignored. Matching is plain substring search, so a key
//! that happens to appear inside a longer placeholder is replaced there too.

use std::collections::HashMap;

/// Replace every occurrence of `{{key}}` with its value
pub fn resolve(text: &str, variables: &HashMap<String, String>) -> String {
    let mut result = text.to_string();
    for (key, value) in variables {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
