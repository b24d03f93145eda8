//! Generic XML document tree.
//!
//! The XML normalizer produces this tree; rendering it to a string is a thin
//! `quick-xml` call (see `render`). The tree carries no escaping — the
//! renderer escapes text and attribute values.

/// One element of the generic XML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Default namespace, set on the document root only.
    pub namespace: Option<String>,
    /// Attributes in emission order.
    pub attributes: Vec<(String, String)>,
    pub children: XmlContent,
}

/// Element content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum XmlContent {
    #[default]
    Empty,
    Text(String),
    Elements(Vec<XmlElement>),
}

impl XmlElement {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            attributes: Vec::new(),
            children: XmlContent::Empty,
        }
    }

    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            children: XmlContent::Text(text.into()),
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn with_children(name: impl Into<String>, children: Vec<XmlElement>) -> Self {
        Self {
            children: XmlContent::Elements(children),
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// A child element by name, if present.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        match &self.children {
            XmlContent::Elements(children) => children.iter().find(|c| c.name == name),
            _ => None,
        }
    }

    /// The text content, if this element holds text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.children {
            XmlContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The value of an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
