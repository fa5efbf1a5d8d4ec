//! DataCite kernel-4 metadata records.
//!
//! This crate turns a [`MetadataRecord`] (DOI, creators, title, publisher,
//! year, subjects, languages, resource type, descriptions) into a DataCite
//! `resource` XML document, and reads such documents back.
//!
//! # Example
//!
//! ```
//! use datacite_xml::{MetadataRecord, RecordRenderer};
//!
//! let record = MetadataRecord::builder("10.1234/x")
//!     .creator("Jane Doe")
//!     .title("T")
//!     .publisher("P")
//!     .publication_year(2020)
//!     .resource_type("Text")
//!     .description("d1")
//!     .build();
//!
//! let xml = RecordRenderer::new().render(&record)?;
//! let parsed = MetadataRecord::from_datacite_xml(&xml)?;
//! assert_eq!(parsed, record);
//! # Ok::<(), datacite_xml::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde` - `Serialize`/`Deserialize` for [`MetadataRecord`]
//! - `json` (default) - loading records from JSON
//! - `parallel` - [`BatchRenderer`] for rendering many files with rayon

mod error;
mod node;
mod reader;
mod record;
mod render;

pub mod schema;

#[cfg(feature = "parallel")]
mod batch;

pub use error::{Error, Result};
pub use node::XmlNode;
pub use record::{MetadataRecord, MetadataRecordBuilder};
pub use render::{render, RecordRenderer, RenderOptions};

#[cfg(feature = "parallel")]
pub use batch::{BatchRenderer, BatchStats};
