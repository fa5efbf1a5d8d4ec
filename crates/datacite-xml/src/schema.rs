//! Fixed names and namespaces of the DataCite kernel-4 resource schema.

/// XML Schema instance namespace bound to the `xsi` prefix.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Default namespace of every kernel-4 document.
pub const KERNEL_NAMESPACE: &str = "http://datacite.org/schema/kernel-4";

/// Value of `xsi:schemaLocation` on the root element.
pub const SCHEMA_LOCATION: &str =
    "http://datacite.org/schema/kernel-4 http://schema.datacite.org/meta/kernel-4/metadata.xsd";

/// `identifierType` of the primary identifier.
pub const IDENTIFIER_TYPE_DOI: &str = "DOI";

/// `descriptionType` given to every description.
pub const DESCRIPTION_TYPE_OTHER: &str = "Other";

/// Element names.
pub mod tag {
    pub const RESOURCE: &str = "resource";
    pub const IDENTIFIER: &str = "identifier";
    pub const CREATORS: &str = "creators";
    pub const CREATOR: &str = "creator";
    pub const CREATOR_NAME: &str = "creatorName";
    pub const TITLES: &str = "titles";
    pub const TITLE: &str = "title";
    pub const PUBLISHER: &str = "publisher";
    pub const PUBLICATION_YEAR: &str = "publicationYear";
    pub const SUBJECTS: &str = "subjects";
    pub const SUBJECT: &str = "subject";
    pub const LANGUAGE: &str = "language";
    pub const RESOURCE_TYPE: &str = "resourceType";
    pub const DESCRIPTIONS: &str = "descriptions";
    pub const DESCRIPTION: &str = "description";
}

/// Attribute names.
pub mod attr {
    pub const XMLNS_XSI: &str = "xmlns:xsi";
    pub const XMLNS: &str = "xmlns";
    pub const SCHEMA_LOCATION: &str = "xsi:schemaLocation";
    pub const IDENTIFIER_TYPE: &str = "identifierType";
    pub const RESOURCE_TYPE_GENERAL: &str = "resourceTypeGeneral";
    pub const DESCRIPTION_TYPE: &str = "descriptionType";
}
