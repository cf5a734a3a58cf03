//! UML syntax model
//!
//! Strongly-typed abstract syntax tree for the subset of UML class diagrams that
//! the skeleton generator understands.
//!
//! # Module Organization
//!
//! - `syntax`: Project, Package, Class, Property, Operation, Parameter, Relation, DataType
//! - `error`: Errors raised while decoding enumerated attribute values
//!
//! The tree is built once by a reader (see `umlgen-xmi`) and treated as immutable
//! afterwards. Packages own their subpackages and classes; relations refer to their
//! client and supplier by class *name*, never by ownership.
//!
//! # Example
//!
//! ```rust
//! use umlgen_model::{Class, Package, Project, Relation, RelationKind};
//!
//! let mut package = Package::new("pkg1", "Shop");
//! package.classes.push(Class::new("c1", "Order"));
//! package.classes.push(Class::new("c2", "Line"));
//! package.relations.push(Relation::new("r1", "lines", RelationKind::Aggregation, "Order", "Line"));
//!
//! let mut project = Project::new("m1", "Store");
//! project.packages.push(package);
//!
//! assert_eq!(project.classes().count(), 2);
//! assert_eq!(project.relations().count(), 1);
//! ```

pub mod error;
pub mod syntax;

// Re-export commonly used types
pub use error::{ModelError, Result};
pub use syntax::*;
