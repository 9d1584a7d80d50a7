/**
 * Directive Matching - CSS Selector Matching
 *
 * Parses directive selectors (`button[mat-button]`, `[ngModel]:not(input)`, ...)
 * and matches them against the compound selector of a template element.
 */
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

static SELECTOR_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?P<not>:not\()"#,
        r#"|(?P<simple>(?P<prefix>[.#]?)[-\w]+)"#,
        r#"|(?:\[(?P<attr>[-.\w*\\$]+)"#,
        r#"(?:=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<uq>[^\]]*)))?\])"#,
        r#"|(?P<not_end>\))"#,
        r#"|(?P<sep>\s*,\s*)"#,
    ))
    .expect("selector regexp is valid")
});

/// One lexical piece of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectorToken<'s> {
    NotStart,
    /// Element name, `.class` or `#id`; `prefix` is `""`, `"."` or `"#"`.
    Simple { prefix: &'s str, name: &'s str },
    Attribute { name: &'s str, value: &'s str },
    NotEnd,
    Separator,
}

fn tokenize(selector: &str) -> impl Iterator<Item = SelectorToken<'_>> {
    SELECTOR_REGEXP.captures_iter(selector).filter_map(|cap| {
        let group = |name: &str| cap.name(name).map(|m| m.as_str());
        if group("not").is_some() {
            Some(SelectorToken::NotStart)
        } else if let Some(simple) = group("simple") {
            let prefix = group("prefix").unwrap_or("");
            Some(SelectorToken::Simple {
                prefix,
                name: &simple[prefix.len()..],
            })
        } else if let Some(name) = group("attr") {
            let value = group("dq")
                .or_else(|| group("sq"))
                .or_else(|| group("uq"))
                .unwrap_or("");
            Some(SelectorToken::Attribute { name, value })
        } else if group("not_end").is_some() {
            Some(SelectorToken::NotEnd)
        } else if group("sep").is_some() {
            Some(SelectorToken::Separator)
        } else {
            None
        }
    })
}

/// Reasons a selector string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("Nesting :not in a selector is not allowed")]
    NestedNot,
    #[error("Multiple selectors in :not are not supported")]
    MultipleInNot,
    #[error("Error in attribute selector \"{0}\". Unescaped \"$\" is not supported. Please escape with \"\\$\".")]
    UnescapedDollar(String),
}

/// CSS Selector representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssSelector {
    pub element: Option<String>,
    pub class_names: Vec<String>,
    /// Attributes stored in pairs: [name, value, name, value, ...]
    pub attrs: Vec<String>,
    pub not_selectors: Vec<CssSelector>,
}

impl CssSelector {
    pub fn new() -> Self {
        CssSelector {
            element: None,
            class_names: Vec::new(),
            attrs: Vec::new(),
            not_selectors: Vec::new(),
        }
    }

    /// Parse a selector string into one `CssSelector` per comma separated part.
    pub fn parse(selector: &str) -> Result<Vec<CssSelector>, SelectorError> {
        let mut results = Vec::new();
        let mut current = CssSelector::new();
        let mut in_not = false;

        for token in tokenize(selector) {
            match token {
                SelectorToken::NotStart if in_not => return Err(SelectorError::NestedNot),
                SelectorToken::NotStart => {
                    in_not = true;
                    current.not_selectors.push(CssSelector::new());
                }
                SelectorToken::Simple { prefix, name } => {
                    let target = current.current_mut(in_not);
                    match prefix {
                        "#" => target.add_attribute("id", name),
                        "." => target.add_class_name(name),
                        _ => target.set_element(name),
                    }
                }
                SelectorToken::Attribute { name, value } => {
                    let name = Self::unescape_attribute(name)?;
                    current.current_mut(in_not).add_attribute(&name, value);
                }
                SelectorToken::NotEnd => in_not = false,
                SelectorToken::Separator if in_not => return Err(SelectorError::MultipleInNot),
                SelectorToken::Separator => {
                    Self::add_result(&mut results, std::mem::take(&mut current));
                }
            }
        }

        Self::add_result(&mut results, current);
        Ok(results)
    }

    /// The selector receiving tokens: the open `:not(...)` if any, else self.
    fn current_mut(&mut self, in_not: bool) -> &mut CssSelector {
        if in_not && !self.not_selectors.is_empty() {
            let last = self.not_selectors.len() - 1;
            &mut self.not_selectors[last]
        } else {
            self
        }
    }

    fn add_result(results: &mut Vec<CssSelector>, mut css_sel: CssSelector) {
        if !css_sel.not_selectors.is_empty()
            && css_sel.element.is_none()
            && css_sel.class_names.is_empty()
            && css_sel.attrs.is_empty()
        {
            css_sel.element = Some("*".to_string());
        }
        results.push(css_sel);
    }

    /// Unescape \$ sequences from CSS attribute selector
    fn unescape_attribute(attr: &str) -> Result<String, SelectorError> {
        let mut result = String::new();
        let mut escaping = false;

        for ch in attr.chars() {
            if ch == '\\' {
                escaping = true;
                continue;
            }
            if ch == '$' && !escaping {
                return Err(SelectorError::UnescapedDollar(attr.to_string()));
            }
            escaping = false;
            result.push(ch);
        }

        Ok(result)
    }

    /// Escape $ in attribute for selector output
    fn escape_attribute(attr: &str) -> String {
        attr.replace('$', "\\$")
    }

    pub fn is_element_selector(&self) -> bool {
        self.has_element_selector() && self.class_names.is_empty() && self.attrs.is_empty()
    }

    pub fn has_element_selector(&self) -> bool {
        matches!(self.element.as_deref(), Some(element) if element != "*")
    }

    pub fn set_element(&mut self, element: &str) {
        self.element = Some(element.to_string());
    }

    pub fn add_attribute(&mut self, name: &str, value: &str) {
        self.attrs.push(name.to_string());
        self.attrs.push(value.to_lowercase());
    }

    pub fn add_class_name(&mut self, name: &str) {
        self.class_names.push(name.to_lowercase());
    }

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .chunks(2)
            .find(|pair| pair[0] == name)
            .map(|pair| pair[1].as_str())
    }
}

impl std::fmt::Display for CssSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.element.as_deref().unwrap_or(""))?;

        for class_name in &self.class_names {
            write!(f, ".{}", class_name)?;
        }

        for pair in self.attrs.chunks(2) {
            let name = Self::escape_attribute(&pair[0]);
            let value = &pair[1];
            if value.is_empty() {
                write!(f, "[{}]", name)?;
            } else {
                write!(f, "[{}={}]", name, value)?;
            }
        }

        for not_selector in &self.not_selectors {
            write!(f, ":not({})", not_selector)?;
        }

        Ok(())
    }
}

impl Default for CssSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Selector Matcher - matches an element's compound selector against the
/// selectors registered with `add_selectable`.
pub struct SelectorMatcher<T> {
    element_map: HashMap<String, Vec<SelectorContext<T>>>,
    class_map: HashMap<String, Vec<SelectorContext<T>>>,
    attr_map: HashMap<String, HashMap<String, Vec<SelectorContext<T>>>>,
    counter: usize,
}

#[derive(Clone)]
struct SelectorContext<T> {
    selector: CssSelector,
    callback_data: T,
    id: usize,
}

impl<T: Clone> SelectorMatcher<T> {
    pub fn new() -> Self {
        SelectorMatcher {
            element_map: HashMap::new(),
            class_map: HashMap::new(),
            attr_map: HashMap::new(),
            counter: 0,
        }
    }

    /// Add several selectors sharing the same data
    pub fn add_selectables(&mut self, css_selectors: Vec<CssSelector>, callback_data: T) {
        for css_selector in css_selectors {
            self.add_selectable(css_selector, callback_data.clone());
        }
    }

    /// Add a selector with associated data
    pub fn add_selectable(&mut self, css_selector: CssSelector, callback_data: T) {
        let context = SelectorContext {
            selector: css_selector,
            callback_data,
            id: self.counter,
        };
        self.counter += 1;
        let selector = &context.selector;

        // Universal `*` is indexed like any other element name.
        if let Some(element) = &selector.element {
            self.element_map
                .entry(element.clone())
                .or_default()
                .push(context.clone());
        }

        for class_name in &selector.class_names {
            self.class_map
                .entry(class_name.clone())
                .or_default()
                .push(context.clone());
        }

        for pair in selector.attrs.chunks(2) {
            self.attr_map
                .entry(pair[0].clone())
                .or_default()
                .entry(pair[1].clone())
                .or_default()
                .push(context.clone());
        }
    }

    /// Match a CSS selector against indexed selectors. The callback is invoked
    /// once per matching registered selector.
    pub fn match_selector<F>(&self, css_selector: &CssSelector, mut callback: F) -> bool
    where
        F: FnMut(&CssSelector, &T),
    {
        let mut matched = false;
        let mut matched_ids = HashSet::new();

        self.match_selector_visit(css_selector, |sel, data, id| {
            if matched_ids.insert(id) {
                callback(sel, data);
                matched = true;
            }
        });

        matched
    }

    fn match_selector_visit<F>(&self, css_selector: &CssSelector, mut callback: F)
    where
        F: FnMut(&CssSelector, &T, usize),
    {
        let mut visit = |contexts: &Vec<SelectorContext<T>>| {
            for context in contexts {
                if Self::is_match(css_selector, &context.selector) {
                    callback(&context.selector, &context.callback_data, context.id);
                }
            }
        };

        if let Some(element) = &css_selector.element {
            if let Some(contexts) = self.element_map.get(element) {
                visit(contexts);
            }
        }

        if let Some(contexts) = self.element_map.get("*") {
            visit(contexts);
        }

        for class_name in &css_selector.class_names {
            if let Some(contexts) = self.class_map.get(class_name) {
                visit(contexts);
            }
        }

        for pair in css_selector.attrs.chunks(2) {
            let (name, value) = (&pair[0], &pair[1]);
            if let Some(attr_values) = self.attr_map.get(name) {
                if let Some(contexts) = attr_values.get(value) {
                    visit(contexts);
                }
                // `[attr]` without a value matches any value of `attr`
                if !value.is_empty() {
                    if let Some(contexts) = attr_values.get("") {
                        visit(contexts);
                    }
                }
            }
        }
    }

    /// Whether `selector` (an element) satisfies every part of `pattern`.
    fn is_match(selector: &CssSelector, pattern: &CssSelector) -> bool {
        if let Some(pat_elem) = pattern.element.as_deref() {
            if pat_elem != "*" && selector.element.as_deref() != Some(pat_elem) {
                return false;
            }
        }

        if !pattern
            .class_names
            .iter()
            .all(|pat_class| selector.class_names.contains(pat_class))
        {
            return false;
        }

        for pattern_attr in pattern.attrs.chunks(2) {
            let (pat_name, pat_value) = (&pattern_attr[0], &pattern_attr[1]);
            let found = selector.attrs.chunks(2).any(|attr| {
                attr[0] == *pat_name
                    && (pat_value.is_empty() || attr[1].eq_ignore_ascii_case(pat_value))
            });
            if !found {
                return false;
            }
        }

        !pattern
            .not_selectors
            .iter()
            .any(|not_selector| Self::is_match(selector, not_selector))
    }
}

impl<T: Clone> Default for SelectorMatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}
