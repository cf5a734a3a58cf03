//! Serialization of the syntax model back into XMI.
//!
//! The output uses the same vocabulary the reader understands, so
//! `read(write(project)) == project` for any well-formed project.

use crate::element::Namespaces;
use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;
use umlgen_model::{
    Class, DataType, Operation, Package, Parameter, ParameterDirection, Project, Property,
    Relation,
};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// XMI document writer
#[derive(Debug, Clone, Default)]
pub struct XmiWriter {
    namespaces: Namespaces,
}

impl XmiWriter {
    pub fn new(namespaces: Namespaces) -> Self {
        Self { namespaces }
    }

    pub fn write(&self, project: &Project) -> Result<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("xmi:XMI");
        root.push_attribute(("xmlns:xmi", self.namespaces.interchange.as_str()));
        root.push_attribute(("xmlns:uml", self.namespaces.model.as_str()));
        root.push_attribute(("xmi:version", "2.1"));
        writer.write_event(Event::Start(root))?;

        let model = typed_start("uml:Model", "Model", &project.id, &project.name);
        if project.packages.is_empty() {
            writer.write_event(Event::Empty(model))?;
        } else {
            writer.write_event(Event::Start(model))?;
            for package in &project.packages {
                write_package(&mut writer, package)?;
            }
            writer.write_event(Event::End(BytesEnd::new("uml:Model")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("xmi:XMI")))?;
        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }
}

fn typed_start<'a>(tag: &'a str, literal: &str, id: &str, name: &str) -> BytesStart<'a> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("xmi:type", format!("uml:{literal}").as_str()));
    start.push_attribute(("xmi:id", id));
    start.push_attribute(("name", name));
    start
}

fn write_package(writer: &mut XmlWriter, package: &Package) -> Result<()> {
    let start = typed_start("packagedElement", "Package", &package.id, &package.name);
    let is_empty = package.subpackages.is_empty()
        && package.classes.is_empty()
        && package.data_types.is_empty()
        && package.relations.is_empty();
    if is_empty {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for subpackage in &package.subpackages {
        write_package(writer, subpackage)?;
    }
    for class in &package.classes {
        write_class(writer, class)?;
    }
    for data_type in &package.data_types {
        write_data_type(writer, data_type)?;
    }
    for relation in &package.relations {
        write_relation(writer, relation)?;
    }
    writer.write_event(Event::End(BytesEnd::new("packagedElement")))?;
    Ok(())
}

fn write_class(writer: &mut XmlWriter, class: &Class) -> Result<()> {
    let start = typed_start("packagedElement", "Class", &class.id, &class.name);
    if class.properties.is_empty() && class.operations.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for property in &class.properties {
        write_property(writer, property)?;
    }
    for operation in &class.operations {
        write_operation(writer, operation)?;
    }
    writer.write_event(Event::End(BytesEnd::new("packagedElement")))?;
    Ok(())
}

fn write_property(writer: &mut XmlWriter, property: &Property) -> Result<()> {
    let mut start = typed_start("ownedAttribute", "Property", &property.id, &property.name);
    if !property.type_ref.is_empty() {
        start.push_attribute(("type", property.type_ref.as_str()));
    }
    start.push_attribute(("visibility", property.visibility.as_str()));
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

fn write_operation(writer: &mut XmlWriter, operation: &Operation) -> Result<()> {
    let mut start = typed_start(
        "ownedOperation",
        "Operation",
        &operation.id,
        &operation.name,
    );
    start.push_attribute(("visibility", operation.visibility.as_str()));
    if operation.parameters.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for parameter in &operation.parameters {
        write_parameter(writer, parameter)?;
    }
    writer.write_event(Event::End(BytesEnd::new("ownedOperation")))?;
    Ok(())
}

fn write_parameter(writer: &mut XmlWriter, parameter: &Parameter) -> Result<()> {
    let mut start = BytesStart::new("ownedParameter");
    start.push_attribute(("xmi:type", "uml:Parameter"));
    start.push_attribute(("xmi:id", parameter.id.as_str()));
    if parameter.direction == ParameterDirection::In {
        start.push_attribute(("name", parameter.name.as_str()));
    }
    if !parameter.type_ref.is_empty() {
        start.push_attribute(("type", parameter.type_ref.as_str()));
    }
    start.push_attribute(("direction", parameter.direction.as_str()));
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

fn write_data_type(writer: &mut XmlWriter, data_type: &DataType) -> Result<()> {
    let start = typed_start("packagedElement", "DataType", &data_type.id, &data_type.name);
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

fn write_relation(writer: &mut XmlWriter, relation: &Relation) -> Result<()> {
    let literal = relation.kind.type_literal();
    let mut start = typed_start("packagedElement", &literal, &relation.id, &relation.name);
    start.push_attribute(("client", relation.client.as_str()));
    start.push_attribute(("supplier", relation.supplier.as_str()));
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use umlgen_model::{RelationKind, Visibility};

    #[test]
    fn writes_namespaced_root_and_model() {
        let project = Project::new("m1", "Empty");
        let xml = XmiWriter::default().write(&project).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"xmlns:xmi="http://schema.omg.org/spec/XMI/2.1""#));
        assert!(xml.contains(r#"<uml:Model xmi:type="uml:Model" xmi:id="m1" name="Empty"/>"#));
    }

    #[test]
    fn writes_relations_and_parameters() {
        let mut class = Class::new("c1", "Order");
        class.properties.push(Property::new(
            "a1",
            "total",
            "Float",
            Visibility::Private,
        ));
        let mut op = Operation::new("o1", "count", Visibility::Public);
        op.parameters.push(Parameter::returning("p1", "Integer"));
        class.operations.push(op);

        let mut package = Package::new("pkg1", "Sales");
        package.classes.push(class);
        package.relations.push(Relation::new(
            "r1",
            "",
            RelationKind::Composition,
            "Order",
            "Line",
        ));

        let mut project = Project::new("m1", "Shop");
        project.packages.push(package);

        let xml = XmiWriter::default().write(&project).unwrap();
        assert!(xml.contains(
            r#"<ownedAttribute xmi:type="uml:Property" xmi:id="a1" name="total" type="Float" visibility="private"/>"#
        ));
        assert!(xml.contains(
            r#"<ownedParameter xmi:type="uml:Parameter" xmi:id="p1" type="Integer" direction="return"/>"#
        ));
        assert!(xml.contains(r#"xmi:type="uml:Composition""#));
        assert!(xml.contains(r#"client="Order" supplier="Line""#));
    }

    #[test]
    fn escapes_attribute_values() {
        let mut package = Package::new("pkg1", "A&B");
        package.classes.push(Class::new("c1", "Quote\"d"));
        let mut project = Project::new("m1", "Esc");
        project.packages.push(package);

        let xml = XmiWriter::default().write(&project).unwrap();
        assert!(xml.contains("A&amp;B"));
        assert!(xml.contains("Quote&quot;d"));
    }
}
