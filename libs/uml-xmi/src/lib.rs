//! XMI ↔ UML syntax model.
//!
//! Reads UML 2.x class models serialized as XMI into [`umlgen_model::Project`]
//! and writes them back. The reader is schema-agnostic beyond the handful of
//! element kinds the generator needs:
//! - `uml:Model` is the project root.
//! - `packagedElement` children are selected by their `xmi:type`
//!   (`uml:Package`, `uml:Class`, `uml:DataType` and the six relation kinds).
//! - Classes own `ownedAttribute` (properties) and `ownedOperation` elements,
//!   operations own `ownedParameter` elements.
//! - Meta attributes (`xmi:id`, `xmi:type`) are namespace-qualified; structural
//!   attributes (`client`, `supplier`, `type`) are not.

pub mod element;
pub mod error;
pub mod reader;
pub mod writer;

pub use element::{Namespaces, XmiElement, UML_NAMESPACE, XMI_NAMESPACE};
pub use error::{Result, XmiError};
pub use reader::XmiReader;
pub use writer::XmiWriter;

use umlgen_model::Project;

/// Parse an XMI document using the default namespaces.
pub fn read_document(input: &str) -> Result<Project> {
    XmiReader::default().read(input)
}

/// Serialize a project as an XMI document using the default namespaces.
pub fn write_document(project: &Project) -> Result<String> {
    XmiWriter::default().write(project)
}
