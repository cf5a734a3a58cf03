//! Recursive-descent reader from XMI into the syntax model.
//!
//! Children are selected by their `xmi:type` tag (`uml:Package`, `uml:Class`,
//! `uml:Association`, ...), never by element order, so interleaving in the
//! source document is irrelevant. Children with an unknown or absent tag are
//! skipped.

use crate::element::{Namespaces, XmiElement};
use crate::error::{Result, XmiError};
use roxmltree::Document;
use std::str::FromStr;
use tracing::{debug, trace};
use umlgen_model::{
    Class, DataType, Operation, Package, Parameter, ParameterDirection, Project, Property,
    Relation, RelationKind, Visibility,
};

const META_PREFIX: &str = "uml:";
const INTERCHANGE_PREFIX: &str = "xmi:";

const PACKAGED_ELEMENT: &str = "packagedElement";
const OWNED_ATTRIBUTE: &str = "ownedAttribute";
const OWNED_OPERATION: &str = "ownedOperation";
const OWNED_PARAMETER: &str = "ownedParameter";

/// Kind of a `packagedElement`, decoded from its `xmi:type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PackagedKind {
    Package,
    Class,
    DataType,
    Relation(RelationKind),
}

impl PackagedKind {
    fn from_type_tag(tag: &str) -> Option<Self> {
        let literal = tag.strip_prefix(META_PREFIX)?;
        match literal {
            "Package" => Some(PackagedKind::Package),
            "Class" => Some(PackagedKind::Class),
            "DataType" => Some(PackagedKind::DataType),
            other => RelationKind::from_type_literal(other).map(PackagedKind::Relation),
        }
    }
}

/// XMI document reader
#[derive(Debug, Clone, Default)]
pub struct XmiReader {
    namespaces: Namespaces,
}

impl XmiReader {
    pub fn new(namespaces: Namespaces) -> Self {
        Self { namespaces }
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    /// Parse a whole document into a [`Project`]. No partial tree is returned
    /// on failure.
    pub fn read(&self, input: &str) -> Result<Project> {
        let doc = Document::parse(input)?;
        let root = XmiElement::new(doc.root_element(), &self.namespaces);

        let model = if root.is_named("Model", false) {
            root
        } else {
            root.find_child("Model", false)?
        };

        let (id, name) = model.signature()?;
        let mut project = Project::new(id, name);

        for element in model.find_children(PACKAGED_ELEMENT, false) {
            match self.packaged_kind(&element) {
                Some(PackagedKind::Package) => project.packages.push(self.read_package(&element)?),
                _ => trace!(element = %element.describe(), "skipping non-package model child"),
            }
        }

        debug!(
            project = %project.name,
            packages = project.packages.len(),
            "parsed XMI model"
        );

        Ok(project)
    }

    fn packaged_kind(&self, element: &XmiElement<'_, '_>) -> Option<PackagedKind> {
        element
            .optional_attribute("type", true)
            .and_then(PackagedKind::from_type_tag)
    }

    /// Children of `parent` named `element_name` whose type tag is `uml:<literal>`
    fn typed_children<'a, 'input>(
        &self,
        parent: &XmiElement<'a, 'input>,
        element_name: &str,
        literal: &str,
    ) -> Vec<XmiElement<'a, 'input>> {
        parent
            .find_children(element_name, false)
            .into_iter()
            .filter(|child| {
                child
                    .optional_attribute("type", true)
                    .and_then(|tag| tag.strip_prefix(META_PREFIX))
                    == Some(literal)
            })
            .collect()
    }

    fn read_package(&self, element: &XmiElement<'_, '_>) -> Result<Package> {
        let (id, name) = element.signature()?;
        let mut package = Package::new(id, name);

        for child in element.find_children(PACKAGED_ELEMENT, false) {
            match self.packaged_kind(&child) {
                Some(PackagedKind::Package) => package.subpackages.push(self.read_package(&child)?),
                Some(PackagedKind::Class) => package.classes.push(self.read_class(&child)?),
                Some(PackagedKind::DataType) => {
                    let (id, name) = child.signature()?;
                    package.data_types.push(DataType::new(id, name));
                }
                Some(PackagedKind::Relation(kind)) => {
                    package.relations.push(self.read_relation(kind, &child)?)
                }
                None => trace!(element = %child.describe(), "skipping unrecognized element"),
            }
        }

        debug!(
            package = %package.name,
            classes = package.classes.len(),
            relations = package.relations.len(),
            subpackages = package.subpackages.len(),
            "parsed package"
        );

        Ok(package)
    }

    fn read_relation(&self, kind: RelationKind, element: &XmiElement<'_, '_>) -> Result<Relation> {
        let id = element.attribute("id", false)?;
        let name = element.optional_attribute("name", false).unwrap_or_default();
        let client = element.attribute("client", false)?;
        let supplier = element.attribute("supplier", false)?;
        Ok(Relation::new(id, name, kind, client, supplier))
    }

    fn read_class(&self, element: &XmiElement<'_, '_>) -> Result<Class> {
        let (id, name) = element.signature()?;
        let mut class = Class::new(id, name);

        for attribute in self.typed_children(element, OWNED_ATTRIBUTE, "Property") {
            class.properties.push(self.read_property(&attribute)?);
        }
        for operation in self.typed_children(element, OWNED_OPERATION, "Operation") {
            class.operations.push(self.read_operation(&operation)?);
        }

        Ok(class)
    }

    fn read_property(&self, element: &XmiElement<'_, '_>) -> Result<Property> {
        let (id, name) = element.signature()?;
        let visibility = read_visibility(element)?;
        Ok(Property::new(id, name, read_type_ref(element), visibility))
    }

    fn read_operation(&self, element: &XmiElement<'_, '_>) -> Result<Operation> {
        let (id, name) = element.signature()?;
        let mut operation = Operation::new(id, name, read_visibility(element)?);

        for parameter in self.typed_children(element, OWNED_PARAMETER, "Parameter") {
            operation.parameters.push(self.read_parameter(&parameter)?);
        }

        let returns = operation
            .parameters
            .iter()
            .filter(|p| p.direction == ParameterDirection::Return)
            .count();
        if returns > 1 {
            return Err(XmiError::MultipleReturnParameters {
                operation: operation.name,
            });
        }

        Ok(operation)
    }

    fn read_parameter(&self, element: &XmiElement<'_, '_>) -> Result<Parameter> {
        let id = element.attribute("id", false)?;
        let direction = match element.optional_attribute("direction", false) {
            Some(value) => parse_value::<ParameterDirection>(element, value)?,
            None => ParameterDirection::In,
        };
        let name = match direction {
            ParameterDirection::Return => "",
            ParameterDirection::In => element.attribute("name", false)?,
        };
        Ok(Parameter::new(id, name, read_type_ref(element), direction))
    }
}

fn parse_value<T>(element: &XmiElement<'_, '_>, value: &str) -> Result<T>
where
    T: FromStr<Err = umlgen_model::ModelError>,
{
    value.parse().map_err(|source| XmiError::InvalidValue {
        element: element.describe(),
        source,
    })
}

fn read_visibility(element: &XmiElement<'_, '_>) -> Result<Visibility> {
    match element.optional_attribute("visibility", false) {
        Some(value) => parse_value(element, value),
        None => Ok(Visibility::Public),
    }
}

/// Type reference of a property or parameter.
///
/// Only the unprefixed `type` attribute is consulted so that the element's own
/// `xmi:type` tag is never mistaken for its value type. Values spelled like a
/// meta tag are treated as unresolved. Without the attribute, a nested
/// `<type href="...#Name"/>` reference is accepted.
fn read_type_ref(element: &XmiElement<'_, '_>) -> String {
    if let Some(value) = element.local_attribute("type") {
        if is_meta_tag(value) {
            return String::new();
        }
        return value.to_string();
    }

    element
        .find_children("type", false)
        .first()
        .and_then(|child| child.local_attribute("href"))
        .and_then(|href| href.rsplit_once('#'))
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty() && !is_meta_tag(fragment))
        .unwrap_or_default()
        .to_string()
}

fn is_meta_tag(value: &str) -> bool {
    value.starts_with(META_PREFIX) || value.starts_with(INTERCHANGE_PREFIX)
}
