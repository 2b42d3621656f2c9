//! Minimal owned XML element tree.
//!
//! The catalog answers with small documents whose optional parts vary from
//! game to game, so responses are read into a tree once and queried with
//! `find`/`find_all` (document-order descendant search) instead of being
//! mapped onto a fixed schema.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::CatalogError;

/// One parsed element with its attributes, text content and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content directly inside this element.
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Value of the attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children with the given tag name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First descendant (not including `self`) with the given tag name, in
    /// document order.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants with the given tag name, in document order.
    pub fn find_all(&self, name: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        self.collect(name, &mut out);
        out
    }

    fn collect<'a>(&'a self, name: &str, out: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect(name, out);
        }
    }
}

/// Parse a complete XML document and return its root element.
pub fn parse_document(xml: &str) -> Result<XmlElement, CatalogError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(element_from_start(e)?),
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| CatalogError::xml("closing tag without an open element"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(CatalogError::xml(format!(
            "document ended inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| CatalogError::xml("document has no root element"))
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement, CatalogError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value: Cow<'_, str> = attr.unescape_value()?;
        attributes.push((key, value.into_owned()));
    }

    Ok(XmlElement {
        name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), CatalogError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(CatalogError::xml(format!(
                "second root element <{}>",
                element.name
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let root = parse_document(
            r#"<?xml version="1.0" encoding="utf-8"?>
            <items total="1">
                <item id="13">
                    <name type="primary" value="Catan"/>
                    <image>https://example.com/catan.jpg</image>
                </item>
            </items>"#,
        )
        .unwrap();

        assert_eq!(root.name, "items");
        assert_eq!(root.attr("total"), Some("1"));
        let item = root.find("item").unwrap();
        assert_eq!(item.attr("id"), Some("13"));
        assert_eq!(item.find("name").unwrap().attr("value"), Some("Catan"));
        assert_eq!(
            item.find("image").unwrap().text,
            "https://example.com/catan.jpg"
        );
    }

    #[test]
    fn test_find_all_is_document_order() {
        let root = parse_document(
            r#"<a><b n="1"><b n="2"/></b><c><b n="3"/></c></a>"#,
        )
        .unwrap();
        let order: Vec<_> = root
            .find_all("b")
            .iter()
            .filter_map(|b| b.attr("n"))
            .collect();
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let root = parse_document(
            r#"<d title="Tom &amp; Jerry">Line one&#10;Line &quot;two&quot;</d>"#,
        )
        .unwrap();
        assert_eq!(root.attr("title"), Some("Tom & Jerry"));
        assert_eq!(root.text, "Line one\nLine \"two\"");
    }

    #[test]
    fn test_cdata_text() {
        let root = parse_document("<d><![CDATA[a <b> c]]></d>").unwrap();
        assert_eq!(root.text, "a <b> c");
    }

    #[test]
    fn test_missing_attribute() {
        let root = parse_document(r#"<d a="1"/>"#).unwrap();
        assert_eq!(root.attr("a"), Some("1"));
        assert_eq!(root.attr("b"), None);
        assert!(root.find("anything").is_none());
    }

    #[test]
    fn test_unparsable_documents() {
        assert!(parse_document("").is_err());
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("<a>").is_err());
        assert!(parse_document("<a/><b/>").is_err());
        assert!(parse_document("<html><body>Rate limited").is_err());
    }
}
