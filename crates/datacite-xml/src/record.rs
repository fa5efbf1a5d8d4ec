//! The metadata record rendered into a DataCite resource.

use crate::{Error, Result};

/// Metadata describing one DOI.
///
/// Records are plain values: build one, hand it to a
/// [`RecordRenderer`](crate::RecordRenderer), discard it. Absent and empty
/// lists are treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MetadataRecord {
    /// Raw DOI, e.g. `10.1234/abcd`.
    pub doi: String,
    /// Creator display names, in order.
    pub creators: Vec<String>,
    pub title: String,
    pub publisher: String,
    /// Publication year, printed verbatim.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "year::deserialize"))]
    pub publication_year: String,
    pub subjects: Vec<String>,
    /// Language codes, e.g. `en`.
    pub languages: Vec<String>,
    /// DataCite `resourceTypeGeneral` value, e.g. `Text` or `Dataset`.
    pub resource_type: String,
    pub descriptions: Vec<String>,
}

impl MetadataRecord {
    /// Start building a record for the given DOI.
    ///
    /// # Example
    ///
    /// ```
    /// use datacite_xml::MetadataRecord;
    ///
    /// let record = MetadataRecord::builder("10.1234/x")
    ///     .creator("Jane Doe")
    ///     .title("T")
    ///     .publisher("P")
    ///     .publication_year(2020)
    ///     .resource_type("Text")
    ///     .build();
    ///
    /// assert_eq!(record.publication_year, "2020");
    /// ```
    pub fn builder(doi: impl Into<String>) -> MetadataRecordBuilder {
        MetadataRecordBuilder {
            record: MetadataRecord {
                doi: doi.into(),
                ..Self::default()
            },
        }
    }

    /// Check that every required field carries a non-blank value.
    ///
    /// All missing fields are reported at once. Rendering never calls this;
    /// it is up to the caller whether incomplete records are acceptable.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("doi", &self.doi),
            ("title", &self.title),
            ("publisher", &self.publisher),
            ("publication_year", &self.publication_year),
            ("resource_type", &self.resource_type),
        ];

        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingFields(missing))
        }
    }

    /// Render this record with the default renderer settings.
    pub fn to_datacite_xml(&self) -> Result<String> {
        crate::render(self)
    }

    /// Decode a record from JSON text.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Json(e.to_string()))
    }

    /// Decode a record from JSON bytes.
    #[cfg(feature = "json")]
    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        serde_json::from_slice(json).map_err(|e| Error::Json(e.to_string()))
    }

    /// Read and decode a JSON record file.
    #[cfg(feature = "json")]
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json_slice(&data)
    }
}

/// Fluent builder for [`MetadataRecord`].
#[derive(Debug, Clone)]
pub struct MetadataRecordBuilder {
    record: MetadataRecord,
}

impl MetadataRecordBuilder {
    /// Append a creator name.
    pub fn creator(mut self, name: impl Into<String>) -> Self {
        self.record.creators.push(name.into());
        self
    }

    /// Append several creator names.
    pub fn creators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record.creators.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.record.publisher = publisher.into();
        self
    }

    /// Set the publication year; any displayable value is accepted.
    pub fn publication_year(mut self, year: impl ToString) -> Self {
        self.record.publication_year = year.to_string();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.record.subjects.push(subject.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.record.languages.push(language.into());
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.record.resource_type = resource_type.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.descriptions.push(description.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> MetadataRecord {
        self.record
    }
}

/// Publication years arrive as either JSON strings or integers.
#[cfg(feature = "serde")]
mod year {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Year::deserialize(deserializer)? {
            Year::Text(s) => s,
            Year::Int(n) => n.to_string(),
        })
    }
}
