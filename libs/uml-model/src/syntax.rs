//! UML syntax elements
//!
//! Every element carries the opaque `id` assigned by the source model and a
//! human-readable `name` used for code generation.

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Top-level packages in source order
    pub packages: Vec<Package>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            packages: Vec::new(),
        }
    }

    /// All packages of the project, depth-first, parents before children
    pub fn all_packages(&self) -> Vec<&Package> {
        let mut out = Vec::new();
        for package in &self.packages {
            package.collect_into(&mut out);
        }
        out
    }

    /// Every class of the project regardless of nesting depth
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.all_packages()
            .into_iter()
            .flat_map(|package| package.classes.iter())
    }

    /// Every relation of the project regardless of nesting depth
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.all_packages()
            .into_iter()
            .flat_map(|package| package.relations.iter())
    }
}

/// A package; packages form a tree rooted at the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub subpackages: Vec<Package>,
    pub classes: Vec<Class>,
    pub relations: Vec<Relation>,
    pub data_types: Vec<DataType>,
}

impl Package {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subpackages: Vec::new(),
            classes: Vec::new(),
            relations: Vec::new(),
            data_types: Vec::new(),
        }
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Package>) {
        out.push(self);
        for subpackage in &self.subpackages {
            subpackage.collect_into(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub properties: Vec<Property>,
    pub operations: Vec<Operation>,
}

impl Class {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            properties: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Type references used by properties and by `in`/`return` parameters,
    /// in declaration order. Empty (unresolved) references are skipped.
    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        let property_types = self.properties.iter().map(|p| p.type_ref.as_str());
        let parameter_types = self
            .operations
            .iter()
            .flat_map(|op| op.parameters.iter())
            .map(|p| p.type_ref.as_str());
        property_types
            .chain(parameter_types)
            .filter(|type_ref| !type_ref.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    /// Name of a class, data type or primitive; empty when unresolved
    #[serde(rename = "type")]
    pub type_ref: String,
    pub visibility: Visibility,
}

impl Property {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        type_ref: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_ref: type_ref.into(),
            visibility,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub visibility: Visibility,
}

impl Operation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parameters: Vec::new(),
            visibility,
        }
    }

    /// Parameters passed by the caller
    pub fn in_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.direction == ParameterDirection::In)
    }

    /// The lone `return` parameter, if any
    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.direction == ParameterDirection::Return)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    /// Empty for `return` parameters
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    pub direction: ParameterDirection,
}

impl Parameter {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        type_ref: impl Into<String>,
        direction: ParameterDirection,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            type_ref: type_ref.into(),
            direction,
        }
    }

    pub fn returning(id: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self::new(id, "", type_ref, ParameterDirection::Return)
    }
}

/// Directed relation between two classes, referenced by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
    pub name: String,
    pub kind: RelationKind,
    /// Dependent side
    pub client: String,
    /// Depended-upon side
    pub supplier: String,
}

impl Relation {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: RelationKind,
        client: impl Into<String>,
        supplier: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            client: client.into(),
            supplier: supplier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    pub id: String,
    pub name: String,
}

impl DataType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Package,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Package => "package",
        }
    }
}

impl FromStr for Visibility {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            "package" => Ok(Visibility::Package),
            other => Err(ModelError::UnrecognizedVisibility(other.to_string())),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterDirection {
    In,
    Return,
}

impl ParameterDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterDirection::In => "in",
            ParameterDirection::Return => "return",
        }
    }
}

impl FromStr for ParameterDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(ParameterDirection::In),
            "return" => Ok(ParameterDirection::Return),
            other => Err(ModelError::UnrecognizedDirection(other.to_string())),
        }
    }
}

impl fmt::Display for ParameterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a relation; all kinds share the same shape and differ only in
/// how the generator interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Association,
    Aggregation,
    Composition,
    Dependency,
    Generalization,
    Realization,
}

impl RelationKind {
    pub const ALL: [RelationKind; 6] = [
        RelationKind::Association,
        RelationKind::Aggregation,
        RelationKind::Composition,
        RelationKind::Dependency,
        RelationKind::Generalization,
        RelationKind::Realization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Association => "association",
            RelationKind::Aggregation => "aggregation",
            RelationKind::Composition => "composition",
            RelationKind::Dependency => "dependency",
            RelationKind::Generalization => "generalization",
            RelationKind::Realization => "realization",
        }
    }

    /// Element type literal of the interchange format, e.g. `Aggregation`
    pub fn type_literal(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().chain(chars).collect(),
        }
    }

    /// Inverse of [`RelationKind::type_literal`]
    pub fn from_type_literal(literal: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_literal() == literal)
    }

    /// Generalization and realization end up in the base-class list
    pub fn is_inheritance(&self) -> bool {
        matches!(
            self,
            RelationKind::Generalization | RelationKind::Realization
        )
    }
}

impl FromStr for RelationKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnrecognizedRelationKind(s.to_string()))
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
