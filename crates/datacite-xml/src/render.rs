//! Rendering of metadata records into DataCite kernel-4 XML.

use std::io::Write;

use quick_xml::events::{BytesDecl, Event};
use quick_xml::Writer;

use crate::schema::{self, attr, tag};
use crate::{Error, MetadataRecord, Result, XmlNode};

/// Output formatting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level, or `None` for single-line output.
    pub indent: Option<usize>,
    /// Emit an `<?xml ...?>` declaration before the root element.
    pub declaration: bool,
}

impl RenderOptions {
    /// Single-line output without a declaration.
    pub fn compact() -> Self {
        Self {
            indent: None,
            declaration: false,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: false,
        }
    }
}

/// Renders [`MetadataRecord`]s as DataCite `resource` documents.
///
/// The renderer holds no state beyond its options and performs no
/// validation: whatever the record carries is written out, empty strings
/// included.
///
/// # Example
///
/// ```
/// use datacite_xml::{MetadataRecord, RecordRenderer, RenderOptions};
///
/// let record = MetadataRecord::builder("10.1234/x")
///     .creator("Jane Doe")
///     .title("T")
///     .publisher("P")
///     .publication_year(2020)
///     .language("en")
///     .resource_type("Text")
///     .build();
///
/// let xml = RecordRenderer::with_options(RenderOptions::compact()).render(&record)?;
/// assert!(xml.contains("<language>en</language>"));
/// # Ok::<(), datacite_xml::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordRenderer {
    options: RenderOptions,
}

impl RecordRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Output settings this renderer was created with.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Build the `resource` element tree for a record.
    pub fn build_tree(&self, record: &MetadataRecord) -> XmlNode {
        let mut root = XmlNode::new(tag::RESOURCE)
            .attr(attr::XMLNS_XSI, schema::XSI_NAMESPACE)
            .attr(attr::XMLNS, schema::KERNEL_NAMESPACE)
            .attr(attr::SCHEMA_LOCATION, schema::SCHEMA_LOCATION)
            .child(
                XmlNode::new(tag::IDENTIFIER)
                    .attr(attr::IDENTIFIER_TYPE, schema::IDENTIFIER_TYPE_DOI)
                    .content(&record.doi),
            )
            // Always present, even with no creators.
            .child(XmlNode::new(tag::CREATORS).children(record.creators.iter().map(|name| {
                XmlNode::new(tag::CREATOR).child(XmlNode::new(tag::CREATOR_NAME).content(name))
            })))
            .child(XmlNode::new(tag::TITLES).child(XmlNode::new(tag::TITLE).content(&record.title)))
            .child(XmlNode::new(tag::PUBLISHER).content(&record.publisher))
            .child(XmlNode::new(tag::PUBLICATION_YEAR).content(&record.publication_year));

        if !record.subjects.is_empty() {
            root = root.child(
                XmlNode::new(tag::SUBJECTS).children(
                    record
                        .subjects
                        .iter()
                        .map(|s| XmlNode::new(tag::SUBJECT).content(s)),
                ),
            );
        }

        // Languages are bare siblings under the root, no wrapper.
        root = root.children(
            record
                .languages
                .iter()
                .map(|l| XmlNode::new(tag::LANGUAGE).content(l)),
        );

        root = root.child(
            XmlNode::new(tag::RESOURCE_TYPE)
                .attr(attr::RESOURCE_TYPE_GENERAL, &record.resource_type)
                .content(&record.resource_type),
        );

        if !record.descriptions.is_empty() {
            root = root.child(
                XmlNode::new(tag::DESCRIPTIONS).children(record.descriptions.iter().map(|d| {
                    XmlNode::new(tag::DESCRIPTION)
                        .attr(attr::DESCRIPTION_TYPE, schema::DESCRIPTION_TYPE_OTHER)
                        .content(d)
                })),
            );
        }

        root
    }

    /// Render a record to an XML string.
    pub fn render(&self, record: &MetadataRecord) -> Result<String> {
        let mut output = Vec::new();
        self.write(record, &mut output)?;
        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write a rendered record to a writer.
    pub fn write<W: Write>(&self, record: &MetadataRecord, writer: W) -> Result<()> {
        let mut xml_writer = match self.options.indent {
            Some(width) => Writer::new_with_indent(writer, b' ', width),
            None => Writer::new(writer),
        };

        if self.options.declaration {
            xml_writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        self.build_tree(record).write_to(&mut xml_writer)
    }
}

/// Render a record with default options.
pub fn render(record: &MetadataRecord) -> Result<String> {
    RecordRenderer::new().render(record)
}
