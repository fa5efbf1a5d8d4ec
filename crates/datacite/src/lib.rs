//! DataCite - metadata record library.
//!
//! This crate provides a unified entry point to the DataCite crates.
//!
//! # Crates
//!
//! - [`datacite_xml`] - Record model, kernel-4 XML rendering and reading
//!
//! # Example
//!
//! ```no_run
//! use datacite::prelude::*;
//!
//! let record = MetadataRecord::from_json_file("record.json")?;
//! record.validate()?;
//!
//! let xml = RecordRenderer::new().render(&record)?;
//! std::fs::write("record.xml", xml)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use datacite_xml as xml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use datacite_xml::{Error, MetadataRecord, RecordRenderer, RenderOptions, XmlNode};

    #[cfg(feature = "parallel")]
    pub use datacite_xml::{BatchRenderer, BatchStats};
}

// Re-export commonly used items at the crate root
pub use datacite_xml::{render, schema, MetadataRecord, RecordRenderer};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
