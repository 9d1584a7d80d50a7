//! Display parts
//!
//! Symbol text formatted by the type checker may reference the `i0`, `i1`, ...
//! namespace imports of generated type-check code. Those are stripped before
//! the text is shown.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of a namespace alias part.
pub const ALIAS_NAME: &str = "aliasName";
/// Kind of a punctuation part.
pub const SYMBOL_PUNC: &str = "punctuation";

static TCB_ALIAS_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"i\d+").expect("alias import regexp is valid"));

/// A fragment of formatted symbol text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDisplayPart {
    pub text: String,
    pub kind: String,
}

impl SymbolDisplayPart {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }
}

fn is_import_alias(part: &SymbolDisplayPart) -> bool {
    part.kind == ALIAS_NAME && TCB_ALIAS_IMPORT.is_match(&part.text)
}

fn is_dot_punctuation(part: &SymbolDisplayPart) -> bool {
    part.kind == SYMBOL_PUNC && part.text == "."
}

/// Drop generated aliases together with the `.` joining them to the next
/// identifier, so `i0.NgForOf` reads `NgForOf`.
pub fn filter_alias_imports(display_parts: &[SymbolDisplayPart]) -> Vec<SymbolDisplayPart> {
    display_parts
        .iter()
        .enumerate()
        .filter(|(i, part)| {
            let previous = i.checked_sub(1).and_then(|prev| display_parts.get(prev));
            let next = display_parts.get(i + 1);

            let alias_followed_by_dot = is_import_alias(part) && next.is_some_and(is_dot_punctuation);
            let dot_preceded_by_alias =
                is_dot_punctuation(part) && previous.is_some_and(is_import_alias);
            !alias_followed_by_dot && !dot_preceded_by_alias
        })
        .map(|(_, part)| part.clone())
        .collect()
}
