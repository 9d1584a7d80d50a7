//! Directive attribution
//!
//! Answers "which directives apply to this element *because of* its tag name"
//! and "... because of this attribute". The selector matcher can only say
//! whether a selector matches, so the cause is found by elimination: match the
//! element's full compound selector, match it again with the tag or attribute
//! removed, and keep the directives that only matched the first time.

use indexmap::IndexMap;
use std::fmt;

use crate::directive_matching::{CssSelector, SelectorError, SelectorMatcher};
use crate::logging::{Logger, NullLogger};
use crate::parse_util::ParseSourceSpan;
use crate::render3::r3_ast::{Element, R3Node, Template};

/// Anything that can be matched onto an element by selector.
pub trait DirectiveDescriptor {
    /// `None` for directives that are never matched by selector.
    fn selector(&self) -> Option<&str>;
}

/// Directive or component known to the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectiveSymbol {
    pub name: String,
    pub selector: Option<String>,
    pub is_component: bool,
}

impl DirectiveSymbol {
    pub fn new(name: impl Into<String>, selector: Option<&str>) -> Self {
        Self {
            name: name.into(),
            selector: selector.map(str::to_string),
            is_component: false,
        }
    }

    pub fn component(name: impl Into<String>, selector: &str) -> Self {
        Self {
            is_component: true,
            ..Self::new(name, Some(selector))
        }
    }
}

impl DirectiveDescriptor for DirectiveSymbol {
    fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }
}

/// Selector parsing and matching, used as a black box.
pub trait SelectorCapability {
    type Selector;
    type Matcher;
    type Error: fmt::Display;

    fn parse(&self, selector: &str) -> Result<Vec<Self::Selector>, Self::Error>;

    /// Matcher over the selectors of a single directive.
    fn create_matcher(&self, selectables: Vec<Self::Selector>) -> Self::Matcher;

    fn is_match(&self, matcher: &Self::Matcher, selector: &Self::Selector) -> bool;
}

/// `SelectorCapability` backed by `CssSelector` and `SelectorMatcher`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssSelectorCapability;

impl SelectorCapability for CssSelectorCapability {
    type Selector = CssSelector;
    type Matcher = SelectorMatcher<()>;
    type Error = SelectorError;

    fn parse(&self, selector: &str) -> Result<Vec<CssSelector>, SelectorError> {
        CssSelector::parse(selector)
    }

    fn create_matcher(&self, selectables: Vec<CssSelector>) -> SelectorMatcher<()> {
        let mut matcher = SelectorMatcher::new();
        matcher.add_selectables(selectables, ());
        matcher
    }

    fn is_match(&self, matcher: &SelectorMatcher<()>, selector: &CssSelector) -> bool {
        matcher.match_selector(selector, |_, _| {})
    }
}

/// Element or template a directive can be attached to.
#[derive(Debug, Clone, Copy)]
pub enum HostNode<'a> {
    Element(&'a Element),
    Template(&'a Template),
}

impl<'a> From<&'a Element> for HostNode<'a> {
    fn from(element: &'a Element) -> Self {
        HostNode::Element(element)
    }
}

impl<'a> From<&'a Template> for HostNode<'a> {
    fn from(template: &'a Template) -> Self {
        HostNode::Template(template)
    }
}

/// An attribute as seen by selector matching.
#[derive(Debug, Clone, Copy)]
pub struct HostAttribute<'a> {
    pub name: &'a str,
    pub value_span: Option<&'a ParseSourceSpan>,
}

impl HostAttribute<'_> {
    /// `[name=value]`, with the value taken verbatim from the source.
    pub fn to_selector_string(&self) -> String {
        let value = self.value_span.map(ParseSourceSpan::text).unwrap_or("");
        format!("[{}={}]", self.name, value)
    }
}

impl<'a> HostNode<'a> {
    pub fn from_node(node: &'a R3Node) -> Option<Self> {
        match node {
            R3Node::Element(element) => Some(HostNode::Element(element)),
            R3Node::Template(template) => Some(HostNode::Template(template)),
            _ => None,
        }
    }

    pub fn tag_name(&self) -> &'a str {
        match *self {
            HostNode::Element(element) => &element.name,
            HostNode::Template(template) => template.tag_name.as_deref().unwrap_or(""),
        }
    }

    /// Static attributes, then bound inputs, then (templates only) the
    /// attributes of the structural directive.
    pub fn attributes(&self) -> Vec<HostAttribute<'a>> {
        let (attributes, inputs) = match *self {
            HostNode::Element(element) => (&element.attributes, &element.inputs),
            HostNode::Template(template) => (&template.attributes, &template.inputs),
        };

        let mut result: Vec<HostAttribute<'a>> = attributes
            .iter()
            .map(|attr| HostAttribute {
                name: &attr.name,
                value_span: attr.value_span.as_ref(),
            })
            .chain(inputs.iter().map(|input| HostAttribute {
                name: &input.name,
                value_span: input.value_span.as_ref(),
            }))
            .collect();

        if let HostNode::Template(template) = *self {
            result.extend(template.template_attrs.iter().map(|attr| HostAttribute {
                name: attr.name(),
                value_span: attr.value_span(),
            }));
        }
        result
    }
}

/// Set of matched candidates, keyed by position in the candidate slice and
/// iterated in candidate order.
#[derive(Debug)]
pub struct DirectiveSet<'a, D> {
    entries: IndexMap<usize, &'a D>,
}

impl<'a, D> DirectiveSet<'a, D> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the candidate at `index` is in the set.
    pub fn contains_index(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Whether `directive` (by identity) is in the set.
    pub fn contains(&self, directive: &D) -> bool {
        self.entries
            .values()
            .any(|candidate| std::ptr::eq(*candidate, directive))
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a D> + '_ {
        self.entries.values().copied()
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &DirectiveSet<'a, D>) -> DirectiveSet<'a, D> {
        self.entries
            .iter()
            .filter(|(index, _)| !other.entries.contains_key(*index))
            .map(|(index, directive)| (*index, *directive))
            .collect()
    }

    pub fn union(&self, other: &DirectiveSet<'a, D>) -> DirectiveSet<'a, D> {
        let mut entries = self.entries.clone();
        for (index, directive) in &other.entries {
            entries.entry(*index).or_insert(*directive);
        }
        DirectiveSet { entries }
    }
}

impl<D> Default for DirectiveSet<'_, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for DirectiveSet<'_, D> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<'a, D> FromIterator<(usize, &'a D)> for DirectiveSet<'a, D> {
    fn from_iter<I: IntoIterator<Item = (usize, &'a D)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

static NULL_LOGGER: NullLogger = NullLogger;

pub struct DirectiveAttribution<'c, C: SelectorCapability> {
    capability: &'c C,
    logger: &'c dyn Logger,
}

impl<'c, C: SelectorCapability> DirectiveAttribution<'c, C> {
    pub fn new(capability: &'c C) -> Self {
        Self::with_logger(capability, &NULL_LOGGER)
    }

    pub fn with_logger(capability: &'c C, logger: &'c dyn Logger) -> Self {
        Self { capability, logger }
    }

    /// Directives matched because of the host's tag name.
    pub fn matches_for_tag<'a, D: DirectiveDescriptor>(
        &self,
        host: HostNode<'_>,
        directives: &'a [D],
    ) -> DirectiveSet<'a, D> {
        let all_attrs = serialize_attributes(&host.attributes());
        let all_matches =
            self.matches_for_selector(directives, &format!("{}{}", host.tag_name(), all_attrs));
        let matches_without_element = self.matches_for_selector(directives, &all_attrs);
        all_matches.difference(&matches_without_element)
    }

    /// Directives matched because of the attribute `name`. The comparison
    /// selector drops the tag name along with the attribute.
    pub fn matches_for_attribute<'a, D: DirectiveDescriptor>(
        &self,
        name: &str,
        host: HostNode<'_>,
        directives: &'a [D],
    ) -> DirectiveSet<'a, D> {
        let attributes = host.attributes();
        let all_attrs = serialize_attributes(&attributes);
        let all_matches =
            self.matches_for_selector(directives, &format!("{}{}", host.tag_name(), all_attrs));

        let attrs_excluding_name: Vec<HostAttribute<'_>> = attributes
            .into_iter()
            .filter(|attr| attr.name != name)
            .collect();
        let matches_without_attr =
            self.matches_for_selector(directives, &serialize_attributes(&attrs_excluding_name));
        all_matches.difference(&matches_without_attr)
    }

    /// Every directive whose selector matches the compound `selector`.
    pub fn matches_for_selector<'a, D: DirectiveDescriptor>(
        &self,
        directives: &'a [D],
        selector: &str,
    ) -> DirectiveSet<'a, D> {
        let selectors = match self.capability.parse(selector) {
            Ok(selectors) => selectors,
            Err(err) => {
                self.logger
                    .debug(&format!("cannot parse element selector {}: {}", selector, err));
                return DirectiveSet::new();
            }
        };
        if selectors.is_empty() {
            return DirectiveSet::new();
        }

        directives
            .iter()
            .enumerate()
            .filter(|(_, directive)| self.directive_matches(*directive, &selectors))
            .collect()
    }

    fn directive_matches<D: DirectiveDescriptor>(&self, directive: &D, selectors: &[C::Selector]) -> bool {
        let Some(directive_selector) = directive.selector() else {
            return false;
        };
        let selectables = match self.capability.parse(directive_selector) {
            Ok(selectables) => selectables,
            Err(err) => {
                self.logger.debug(&format!(
                    "skipping directive with invalid selector {}: {}",
                    directive_selector, err
                ));
                return false;
            }
        };
        let matcher = self.capability.create_matcher(selectables);
        selectors
            .iter()
            .any(|selector| self.capability.is_match(&matcher, selector))
    }
}

/// Full compound selector of `host`: tag name followed by every attribute.
pub fn make_element_selector(host: HostNode<'_>) -> String {
    format!(
        "{}{}",
        host.tag_name(),
        serialize_attributes(&host.attributes())
    )
}

fn serialize_attributes(attributes: &[HostAttribute<'_>]) -> String {
    attributes
        .iter()
        .map(HostAttribute::to_selector_string)
        .collect()
}

/// `DirectiveAttribution::matches_for_tag` with CSS selector matching.
pub fn get_directive_matches_for_element_tag<'a, D: DirectiveDescriptor>(
    host: HostNode<'_>,
    directives: &'a [D],
) -> DirectiveSet<'a, D> {
    DirectiveAttribution::new(&CssSelectorCapability).matches_for_tag(host, directives)
}

/// `DirectiveAttribution::matches_for_attribute` with CSS selector matching.
pub fn get_directive_matches_for_attribute<'a, D: DirectiveDescriptor>(
    name: &str,
    host: HostNode<'_>,
    directives: &'a [D],
) -> DirectiveSet<'a, D> {
    DirectiveAttribution::new(&CssSelectorCapability).matches_for_attribute(name, host, directives)
}
