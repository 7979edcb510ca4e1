//! Required-element lookup over parsed documents.
//!
//! Every harvester describes the structure it depends on as an
//! [`ExtractionTarget`] and asks for it here. A missing element is an error
//! carrying the search criteria; nothing is defaulted.

use std::fmt;

use regex::Regex;
use scraper::ElementRef;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("required element not found: {criteria}")]
    Missing { criteria: String },
    #[error("expected a single element for {criteria}, found {count}")]
    Ambiguous { criteria: String, count: usize },
    #[error("element {criteria} has no {attribute:?} attribute")]
    MissingAttribute { criteria: String, attribute: String },
}

/// How an attribute value must look for an element to match.
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// Whole value equality. For `class`, a single class token also matches.
    Exact(String),
    Contains(String),
    Pattern(Regex),
}

impl AttrMatch {
    fn accepts(&self, name: &str, value: &str) -> bool {
        match self {
            AttrMatch::Exact(expected) => {
                value == expected
                    || (name == "class" && value.split_whitespace().any(|token| token == expected))
            }
            AttrMatch::Contains(needle) => value.contains(needle.as_str()),
            AttrMatch::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

/// Tag name plus attribute predicates; all predicates must hold.
#[derive(Debug, Clone)]
pub struct ExtractionTarget {
    tag: String,
    attrs: Vec<(String, AttrMatch)>,
}

impl ExtractionTarget {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, AttrMatch::Exact(value.into()))
    }

    pub fn attr_contains(self, name: impl Into<String>, needle: impl Into<String>) -> Self {
        self.with(name, AttrMatch::Contains(needle.into()))
    }

    pub fn attr_matches(self, name: impl Into<String>, pattern: Regex) -> Self {
        self.with(name, AttrMatch::Pattern(pattern))
    }

    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value)
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    fn with(mut self, name: impl Into<String>, matcher: AttrMatch) -> Self {
        self.attrs.push((name.into(), matcher));
        self
    }

    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        let el = element.value();
        el.name().eq_ignore_ascii_case(&self.tag)
            && self.attrs.iter().all(|(name, matcher)| {
                el.attr(name)
                    .is_some_and(|value| matcher.accepts(name, value))
            })
    }

    fn criteria(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExtractionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        for (name, matcher) in &self.attrs {
            match matcher {
                AttrMatch::Exact(value) => write!(f, "[{name}={value:?}]")?,
                AttrMatch::Contains(value) => write!(f, "[{name}*={value:?}]")?,
                AttrMatch::Pattern(pattern) => write!(f, "[{name}~=/{}/]", pattern.as_str())?,
            }
        }
        Ok(())
    }
}

/// Every matching descendant of `parent`, in document order.
pub fn find_all<'a>(parent: ElementRef<'a>, target: &ExtractionTarget) -> Vec<ElementRef<'a>> {
    parent
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| target.matches(*element))
        .collect()
}

/// First matching descendant in document order.
pub fn find_tag<'a>(
    parent: ElementRef<'a>,
    target: &ExtractionTarget,
) -> Result<ElementRef<'a>, ExtractError> {
    parent
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| target.matches(*element))
        .ok_or_else(|| ExtractError::Missing {
            criteria: target.criteria(),
        })
}

/// The only matching descendant; several matches are an error.
pub fn find_unique_tag<'a>(
    parent: ElementRef<'a>,
    target: &ExtractionTarget,
) -> Result<ElementRef<'a>, ExtractError> {
    let mut found = find_all(parent, target);
    match found.len() {
        0 => Err(ExtractError::Missing {
            criteria: target.criteria(),
        }),
        1 => Ok(found.remove(0)),
        count => Err(ExtractError::Ambiguous {
            criteria: target.criteria(),
            count,
        }),
    }
}

/// Attribute that the matched element must carry.
pub fn required_attr<'a>(
    element: ElementRef<'a>,
    target: &ExtractionTarget,
    attribute: &str,
) -> Result<&'a str, ExtractError> {
    element
        .value()
        .attr(attribute)
        .ok_or_else(|| ExtractError::MissingAttribute {
            criteria: target.criteria(),
            attribute: attribute.to_string(),
        })
}

/// Concatenated text of the element and all its descendants.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
