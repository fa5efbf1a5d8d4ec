//! Reading DataCite `resource` documents back into records.

use crate::schema::{attr, tag};
use crate::{Error, MetadataRecord, Result, XmlNode};

impl MetadataRecord {
    /// Parse a DataCite kernel-4 document into a record.
    ///
    /// Only the elements this crate renders are read; anything else is
    /// ignored. Missing elements leave the corresponding field empty.
    pub fn from_datacite_xml(xml: &str) -> Result<Self> {
        let root = XmlNode::from_xml(xml)?;
        Self::from_resource(&root)
    }

    /// Build a record from an already parsed `resource` element.
    pub fn from_resource(root: &XmlNode) -> Result<Self> {
        if root.tag != tag::RESOURCE {
            return Err(Error::UnexpectedRoot {
                found: root.tag.clone(),
            });
        }

        let text = |name: &str| {
            root.find(name)
                .map(|n| n.content.clone())
                .unwrap_or_default()
        };

        let resource_type = root
            .find(tag::RESOURCE_TYPE)
            .map(|n| {
                n.attribute(attr::RESOURCE_TYPE_GENERAL)
                    .filter(|v| !v.is_empty())
                    .unwrap_or(n.content.as_str())
                    .to_string()
            })
            .unwrap_or_default();

        Ok(Self {
            doi: text(tag::IDENTIFIER),
            creators: nested(root, tag::CREATORS, tag::CREATOR)
                .filter_map(|c| c.find(tag::CREATOR_NAME))
                .map(|n| n.content.clone())
                .collect(),
            title: root
                .find(tag::TITLES)
                .and_then(|t| t.find(tag::TITLE))
                .map(|n| n.content.clone())
                .unwrap_or_default(),
            publisher: text(tag::PUBLISHER),
            publication_year: text(tag::PUBLICATION_YEAR),
            subjects: nested(root, tag::SUBJECTS, tag::SUBJECT)
                .map(|n| n.content.clone())
                .collect(),
            languages: root
                .find_all(tag::LANGUAGE)
                .map(|n| n.content.clone())
                .collect(),
            resource_type,
            descriptions: nested(root, tag::DESCRIPTIONS, tag::DESCRIPTION)
                .map(|n| n.content.clone())
                .collect(),
        })
    }
}

/// Children named `item` of the first `wrapper` child, if any.
fn nested<'a>(root: &'a XmlNode, wrapper: &'a str, item: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
    root.find(wrapper)
        .into_iter()
        .flat_map(move |w| w.find_all(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordRenderer, RenderOptions};

    fn full() -> MetadataRecord {
        MetadataRecord::builder("10.5072/example")
            .creators(["Doe, Jane", "Roe, John"])
            .title("Fish & Chips")
            .publisher("Example University")
            .publication_year(2019)
            .subject("Cooking")
            .subject("History")
            .language("en")
            .language("fr")
            .resource_type("Text")
            .description("First")
            .description("Second")
            .build()
    }

    #[test]
    fn test_reads_rendered_record() {
        for options in [RenderOptions::default(), RenderOptions::compact()] {
            let xml = RecordRenderer::with_options(options).render(&full()).unwrap();
            let parsed = MetadataRecord::from_datacite_xml(&xml).unwrap();
            assert_eq!(parsed, full());
        }
    }

    #[test]
    fn test_surrounding_whitespace_survives() {
        let record = MetadataRecord::builder("10.1234/x")
            .title("  padded  ")
            .subject(" leading")
            .description("line one\n")
            .build();

        for options in [RenderOptions::default(), RenderOptions::compact()] {
            let xml = RecordRenderer::with_options(options).render(&record).unwrap();
            let parsed = MetadataRecord::from_datacite_xml(&xml).unwrap();
            assert_eq!(parsed, record);
        }
    }

    #[test]
    fn test_reads_handwritten_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<resource xmlns="http://datacite.org/schema/kernel-4">
  <identifier identifierType="DOI">10.1234/abc</identifier>
  <creators/>
  <titles>
    <title>Main</title>
    <title titleType="Subtitle">Ignored</title>
  </titles>
  <publisher>P</publisher>
  <publicationYear>2001</publicationYear>
  <language>de</language>
  <resourceType resourceTypeGeneral="Dataset">Survey data</resourceType>
</resource>"#;

        let record = MetadataRecord::from_datacite_xml(xml).unwrap();
        assert_eq!(record.doi, "10.1234/abc");
        assert!(record.creators.is_empty());
        assert_eq!(record.title, "Main");
        assert_eq!(record.languages, ["de"]);
        assert_eq!(record.resource_type, "Dataset");
        assert!(record.subjects.is_empty());
        assert!(record.descriptions.is_empty());
    }

    #[test]
    fn test_resource_type_falls_back_to_text() {
        let xml = "<resource><resourceType>Software</resourceType></resource>";
        let record = MetadataRecord::from_datacite_xml(xml).unwrap();
        assert_eq!(record.resource_type, "Software");
    }

    #[test]
    fn test_missing_elements_are_empty() {
        let record = MetadataRecord::from_datacite_xml("<resource/>").unwrap();
        assert_eq!(record, MetadataRecord::default());
    }

    #[test]
    fn test_unexpected_root() {
        let result = MetadataRecord::from_datacite_xml("<record><title>T</title></record>");
        match result {
            Err(Error::UnexpectedRoot { found }) => assert_eq!(found, "record"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_xml() {
        let result = MetadataRecord::from_datacite_xml("<resource><title>T</resource>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }
}
