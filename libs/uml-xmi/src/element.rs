//! Namespace-tolerant view over a single XMI element.
//!
//! Interchange documents mix unprefixed structural attributes (`client`,
//! `supplier`, `type`) with namespace-qualified meta attributes (`xmi:id`,
//! `xmi:type`). [`XmiElement`] resolves a local name against an ordered list of
//! candidates: no namespace first (unless forced), then every configured
//! namespace in search order.

use crate::error::{Result, XmiError};
use roxmltree::Node;

pub const UML_NAMESPACE: &str = "http://schema.omg.org/spec/UML/2.1";
pub const XMI_NAMESPACE: &str = "http://schema.omg.org/spec/XMI/2.1";

/// Namespaces searched for qualified names, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    /// The UML metamodel namespace (`uml:` prefix)
    pub model: String,
    /// The XMI namespace (`xmi:` prefix)
    pub interchange: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            model: UML_NAMESPACE.to_string(),
            interchange: XMI_NAMESPACE.to_string(),
        }
    }
}

impl Namespaces {
    pub fn new(model: impl Into<String>, interchange: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            interchange: interchange.into(),
        }
    }

    pub fn search_order(&self) -> [&str; 2] {
        [self.model.as_str(), self.interchange.as_str()]
    }
}

/// Wrapper around one element node of a parsed document
#[derive(Debug, Clone, Copy)]
pub struct XmiElement<'a, 'input> {
    node: Node<'a, 'input>,
    namespaces: &'a Namespaces,
}

impl<'a, 'input> XmiElement<'a, 'input> {
    pub fn new(node: Node<'a, 'input>, namespaces: &'a Namespaces) -> Self {
        Self { node, namespaces }
    }

    pub fn node(&self) -> Node<'a, 'input> {
        self.node
    }

    /// Local tag name without namespace
    pub fn tag(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Short description used in error messages, e.g. `packagedElement id="c1"`
    pub fn describe(&self) -> String {
        match self.optional_attribute("id", false) {
            Some(id) => format!("{} id=\"{}\"", self.tag(), id),
            None => self.tag().to_string(),
        }
    }

    fn candidates(&self, force_namespace: bool) -> Vec<Option<&'a str>> {
        let mut candidates = Vec::with_capacity(3);
        if !force_namespace {
            candidates.push(None);
        }
        candidates.extend(self.namespaces.search_order().into_iter().map(Some));
        candidates
    }

    /// First value of `key` found among the namespace candidates
    pub fn optional_attribute(&self, key: &str, force_namespace: bool) -> Option<&'a str> {
        self.candidates(force_namespace)
            .into_iter()
            .find_map(|namespace| match namespace {
                None => self.node.attribute(key),
                Some(uri) => self.node.attribute((uri, key)),
            })
    }

    /// Like [`XmiElement::optional_attribute`] but absence is an error
    pub fn attribute(&self, key: &str, force_namespace: bool) -> Result<&'a str> {
        self.optional_attribute(key, force_namespace)
            .ok_or_else(|| XmiError::MissingAttribute {
                key: key.to_string(),
                element: self.describe(),
            })
    }

    /// Attribute without a namespace, no fallback
    pub fn local_attribute(&self, key: &str) -> Option<&'a str> {
        self.node.attribute(key)
    }

    /// `(id, name)` pair carried by every model element
    pub fn signature(&self) -> Result<(&'a str, &'a str)> {
        Ok((self.attribute("id", false)?, self.attribute("name", false)?))
    }

    fn children_in(&self, namespace: Option<&str>, name: &str) -> Vec<XmiElement<'a, 'input>> {
        self.node
            .children()
            .filter(|child| {
                child.is_element()
                    && child.tag_name().name() == name
                    && child.tag_name().namespace() == namespace
            })
            .map(|child| XmiElement::new(child, self.namespaces))
            .collect()
    }

    /// All children named `name` from the first candidate namespace that has any.
    /// Results are never merged across namespaces; no match yields an empty list.
    pub fn find_children(&self, name: &str, force_namespace: bool) -> Vec<XmiElement<'a, 'input>> {
        self.candidates(force_namespace)
            .into_iter()
            .map(|namespace| self.children_in(namespace, name))
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }

    /// First child named `name`; absence is an error
    pub fn find_child(&self, name: &str, force_namespace: bool) -> Result<XmiElement<'a, 'input>> {
        self.find_children(name, force_namespace)
            .into_iter()
            .next()
            .ok_or_else(|| XmiError::MissingElement {
                name: name.to_string(),
                parent: self.describe(),
            })
    }

    /// Whether this element itself is named `name` under one of the candidates
    pub fn is_named(&self, name: &str, force_namespace: bool) -> bool {
        let tag = self.node.tag_name();
        tag.name() == name && self.candidates(force_namespace).contains(&tag.namespace())
    }
}
