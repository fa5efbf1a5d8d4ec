//! In-memory XML element tree.
//!
//! Documents are assembled as a tree of [`XmlNode`]s and serialized once at
//! the end, so every emitted document is well-formed and text is escaped by
//! the XML writer rather than by hand.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::{Error, Result};

/// A single element with its attributes, text content and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Tag name of the element.
    pub tag: String,
    /// Text content.
    pub content: String,
    /// Attributes as key-value pairs, in emission order.
    pub attributes: Vec<(String, String)>,
    /// Child elements, in emission order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create a new node with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set the text content of this node.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Add an attribute to this node.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child node.
    pub fn child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Write this node and its subtree to an XML writer.
    ///
    /// Elements are always written as a start/end pair, so an element with
    /// no children and no text comes out as `<tag></tag>`.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::Xml(e.to_string()))?;

        // An empty text event keeps the end tag on the same line when indenting.
        if !self.content.is_empty() || self.children.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&self.content)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        for child in &self.children {
            child.write_to(writer)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.tag.as_str())))
            .map_err(|e| Error::Xml(e.to_string()))?;

        Ok(())
    }

    /// Serialize this node without indentation or declaration.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Parse XML text into a node tree, returning the root element.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    stack.push(node_from_start(&e)?);
                }
                Ok(Event::Empty(e)) => {
                    let node = node_from_start(&e)?;
                    attach(&mut stack, &mut root, node);
                }
                Ok(Event::End(_)) => {
                    if let Some(node) = stack.pop() {
                        attach(&mut stack, &mut root, node);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(node) = stack.last_mut() {
                        let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        // Indentation between elements; real text is kept untrimmed.
                        if !text.trim().is_empty() {
                            node.content.push_str(&text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(node) = stack.last_mut() {
                        node.content.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // declarations, comments, processing instructions
                Err(e) => return Err(Error::Xml(format!("XML parse error: {}", e))),
            }
        }

        root.ok_or_else(|| Error::Xml("No root element found in XML".to_string()))
    }

    /// Parse XML bytes into a node tree.
    pub fn from_xml_bytes(xml: &[u8]) -> Result<Self> {
        let xml_str = std::str::from_utf8(xml)?;
        Self::from_xml(xml_str)
    }
}

fn node_from_start(e: &BytesStart<'_>) -> Result<XmlNode> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = XmlNode::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element_keeps_end_tag() {
        let xml = XmlNode::new("creators").to_xml_string().unwrap();
        assert_eq!(xml, "<creators></creators>");
    }

    #[test]
    fn test_nested_with_attributes() {
        let node = XmlNode::new("titles").child(
            XmlNode::new("title")
                .attr("lang", "en")
                .content("A Title"),
        );

        let xml = node.to_xml_string().unwrap();
        assert_eq!(xml, r#"<titles><title lang="en">A Title</title></titles>"#);
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let node = XmlNode::new("subject")
            .attr("scheme", "a<b")
            .content("Fish & Chips <fried>");

        let xml = node.to_xml_string().unwrap();
        assert!(xml.contains("Fish &amp; Chips &lt;fried&gt;"));
        assert!(xml.contains("a&lt;b"));

        let parsed = XmlNode::from_xml(&xml).unwrap();
        assert_eq!(parsed.content, "Fish & Chips <fried>");
        assert_eq!(parsed.attribute("scheme"), Some("a<b"));
    }

    #[test]
    fn test_from_xml_with_declaration() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<resource xmlns="http://datacite.org/schema/kernel-4">
    <creators>
        <creator><creatorName>Jane Doe</creatorName></creator>
        <creator><creatorName>John Roe</creatorName></creator>
    </creators>
    <language/>
</resource>"#;

        let root = XmlNode::from_xml(xml).unwrap();
        assert_eq!(root.tag, "resource");
        assert_eq!(root.attribute("xmlns"), Some("http://datacite.org/schema/kernel-4"));
        assert_eq!(root.children.len(), 2);

        let names: Vec<_> = root
            .find("creators")
            .unwrap()
            .find_all("creator")
            .filter_map(|c| c.find("creatorName"))
            .map(|n| n.content.as_str())
            .collect();
        assert_eq!(names, ["Jane Doe", "John Roe"]);
        assert!(root.find("language").unwrap().content.is_empty());
    }

    #[test]
    fn test_from_xml_keeps_surrounding_whitespace() {
        let xml = "<titles>\n  <title>  padded  </title>\n  <title>line one\n</title>\n</titles>";

        let root = XmlNode::from_xml(xml).unwrap();
        assert!(root.content.is_empty());

        let titles: Vec<_> = root.find_all("title").map(|n| n.content.as_str()).collect();
        assert_eq!(titles, ["  padded  ", "line one\n"]);
    }

    #[test]
    fn test_from_xml_empty() {
        assert!(XmlNode::from_xml("").is_err());
    }

    #[test]
    fn test_from_xml_bytes_rejects_invalid_utf8() {
        let result = XmlNode::from_xml_bytes(&[b'<', 0xff, b'>']);
        assert!(matches!(result, Err(Error::Utf8(_))));
    }
}
