//! In-memory XML element tree for URDF fragments

use std::fmt::Write;

use crate::constants::EMPTY_URDF_NAME;

/// Child of an [`XmlElement`]
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Comment(String),
}

/// XML element with ordered attributes
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child element
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push(child);
        self
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn push_comment(&mut self, text: &str) {
        self.children.push(XmlNode::Comment(xml_comment(text)));
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, comments skipped
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Comment(_) => None,
        })
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Render on a single line
    pub fn to_string_compact(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    /// Render with one element per line, indented by two spaces per level
    pub fn to_string_pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_open_tag(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, xml_escape(value));
        }
    }

    fn write_compact(&self, out: &mut String) {
        self.write_open_tag(out);
        if self.children.is_empty() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_compact(out),
                XmlNode::Comment(text) => {
                    let _ = write!(out, "<!--{}-->", text);
                }
            }
        }
        let _ = write!(out, "</{}>", self.name);
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        self.write_open_tag(out);
        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }
        out.push_str(">\n");
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_pretty(out, depth + 1),
                XmlNode::Comment(text) => {
                    let _ = writeln!(out, "{}  <!--{}-->", indent, text);
                }
            }
        }
        let _ = writeln!(out, "{}</{}>", indent, self.name);
    }
}

impl std::fmt::Display for XmlElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_compact())
    }
}

pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Text safe to put inside `<!-- -->`
pub fn xml_comment(text: &str) -> String {
    text.replace("--", "⸗⸗")
}

/// File name built from ASCII letters, digits, `_`, `-` and `.` only
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Name usable as a URDF link/joint/robot name
pub fn valid_urdf_name(name: &str) -> String {
    if name.is_empty() {
        EMPTY_URDF_NAME.to_string()
    } else {
        name.replace(' ', "_")
    }
}
