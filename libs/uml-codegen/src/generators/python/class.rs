//! Python class skeletons

use crate::error::{Error, Result};
use crate::generators::GeneratorConfig;
use crate::imports::ImportResolver;
use crate::naming::{member_name, plural_member_name, unique_name_by};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;
use umlgen_model::{Class, Operation, Relation, RelationKind, Visibility};

/// Builds the source text of one class from the class itself and the
/// relations in which it is the client.
pub struct ClassSynthesizer<'a> {
    imports: &'a ImportResolver,
    config: &'a GeneratorConfig,
}

/// Constructor parameters and body lines, built in declaration order.
/// `used` holds every parameter and attribute name taken so far, `self` included.
#[derive(Debug)]
struct Constructor {
    params: Vec<String>,
    body: Vec<String>,
    used: HashSet<String>,
}

impl Constructor {
    fn new() -> Self {
        Self {
            params: Vec::new(),
            body: Vec::new(),
            used: HashSet::from(["self".to_string()]),
        }
    }

    /// Reserve a parameter name and its attribute name (`_name` when
    /// `private`). Returns `(parameter, attribute)`.
    fn claim(&mut self, candidate: &str, private: bool) -> (String, String) {
        let attribute_of = |name: &str| {
            if private {
                format!("_{name}")
            } else {
                name.to_string()
            }
        };
        let name = unique_name_by(candidate, |name| {
            !self.used.contains(name) && !self.used.contains(&attribute_of(name))
        });
        let attribute = attribute_of(name.as_str());
        self.used.insert(name.clone());
        self.used.insert(attribute.clone());
        (name, attribute)
    }

    fn is_empty(&self) -> bool {
        self.params.is_empty() && self.body.is_empty()
    }

    fn render(&self, indent: &str) -> String {
        let mut signature = String::from("self");
        for param in &self.params {
            signature.push_str(", ");
            signature.push_str(param);
        }

        let mut code = format!("def __init__({signature}):");
        for line in &self.body {
            code.push('\n');
            code.push_str(indent);
            code.push_str(line);
        }
        code
    }
}

impl<'a> ClassSynthesizer<'a> {
    pub fn new(imports: &'a ImportResolver, config: &'a GeneratorConfig) -> Self {
        Self { imports, config }
    }

    /// Generate the module text for `class`. Every relation must name `class`
    /// as its client.
    pub fn synthesize(&self, class: &Class, relations: &[&Relation]) -> Result<String> {
        if let Some(foreign) = relations.iter().find(|r| r.client != class.name) {
            return Err(Error::ForeignRelation {
                class: class.name.clone(),
                client: foreign.client.clone(),
            });
        }

        let indent = " ".repeat(self.config.indent);
        let mut code = String::new();

        let imports = self.import_lines(class, relations);
        if !imports.is_empty() {
            code.push_str(&imports.join("\n"));
            code.push_str("\n\n\n");
        }

        let bases = base_classes(relations);
        if bases.is_empty() {
            code.push_str(&format!("class {}:\n", class.name));
        } else {
            code.push_str(&format!("class {}({}):\n", class.name, bases.join(", ")));
        }

        let mut members = Vec::new();
        let constructor = self.constructor(class, relations);
        if !constructor.is_empty() {
            members.push(constructor.render(&indent));
        }
        for operation in &class.operations {
            members.push(self.method(operation, &indent));
        }

        if members.is_empty() {
            code.push_str(&indent);
            code.push_str("pass");
        } else {
            code.push_str(&indent_block(&members.join("\n\n"), &indent));
        }
        code.push('\n');

        Ok(code)
    }

    /// `from <path> import <Name>` lines sorted by class name. Names that do not
    /// resolve are dropped.
    fn import_lines(&self, class: &Class, relations: &[&Relation]) -> Vec<String> {
        let relation_suppliers = relations
            .iter()
            .filter(|r| r.kind != RelationKind::Dependency)
            .map(|r| r.supplier.as_str());

        let mut resolved = BTreeMap::new();
        for name in class.referenced_types().chain(relation_suppliers) {
            if name.is_empty() || name == class.name || self.config.is_primitive(name) {
                continue;
            }
            match self.imports.try_resolve(name) {
                Some(path) => {
                    resolved.insert(name, path);
                }
                None => debug!(class = %class.name, r#type = name, "dropping unresolved import"),
            }
        }

        resolved
            .into_iter()
            .map(|(name, path)| format!("from {path} import {name}"))
            .collect()
    }

    fn constructor(&self, class: &Class, relations: &[&Relation]) -> Constructor {
        let mut ctor = Constructor::new();

        for property in &class.properties {
            let private = property.visibility == Visibility::Private;
            let (name, attribute) = ctor.claim(&property.name, private);
            ctor.params.push(self.annotated(&name, &property.type_ref));
            ctor.body.push(format!("self.{attribute} = {name}"));
        }

        for relation in relations {
            let supplier = self.config.native_type(&relation.supplier);
            let naming = self.config.member_naming;
            match relation.kind {
                RelationKind::Association => {
                    let (name, attribute) = ctor.claim(&member_name(&relation.supplier, naming), true);
                    ctor.params.push(format!("{name}: {supplier} | None = None"));
                    ctor.body.push(format!("self.{attribute} = {name}"));
                }
                RelationKind::Aggregation => {
                    let (name, attribute) =
                        ctor.claim(&plural_member_name(&relation.supplier, naming), true);
                    ctor.params.push(format!("{name}: list[{supplier}] | None = None"));
                    ctor.body.push(format!("self.{attribute} = {name} or []"));
                }
                RelationKind::Composition => {
                    let (_, attribute) = ctor.claim(&member_name(&relation.supplier, naming), true);
                    ctor.body.push(format!("self.{attribute} = {supplier}()"));
                }
                RelationKind::Dependency
                | RelationKind::Generalization
                | RelationKind::Realization => {}
            }
        }

        ctor
    }

    fn method(&self, operation: &Operation, indent: &str) -> String {
        let mut signature = String::from("self");
        for parameter in operation.in_parameters() {
            signature.push_str(", ");
            signature.push_str(&self.annotated(&parameter.name, &parameter.type_ref));
        }

        let returns = match operation.return_parameter() {
            None => " -> None".to_string(),
            Some(ret) if ret.type_ref.is_empty() => String::new(),
            Some(ret) => format!(" -> {}", self.config.native_type(&ret.type_ref)),
        };

        format!("def {}({}){}:\n{}pass", operation.name, signature, returns, indent)
    }

    fn annotated(&self, name: &str, type_ref: &str) -> String {
        if type_ref.is_empty() {
            name.to_string()
        } else {
            format!("{}: {}", name, self.config.native_type(type_ref))
        }
    }
}

/// Suppliers of generalization/realization relations, first occurrence wins
fn base_classes<'r>(relations: &[&'r Relation]) -> Vec<&'r str> {
    let mut bases: Vec<&str> = Vec::new();
    for relation in relations.iter().filter(|r| r.kind.is_inheritance()) {
        if !bases.contains(&relation.supplier.as_str()) {
            bases.push(&relation.supplier);
        }
    }
    bases
}

/// Indent every non-empty line of `block`
fn indent_block(block: &str, indent: &str) -> String {
    block
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::MemberNaming;
    use umlgen_model::{Package, Parameter, ParameterDirection, Project, Property};

    fn project_with(classes: &[&str]) -> Project {
        let mut package = Package::new("pkg1", "Test");
        for name in classes {
            package.classes.push(Class::new(format!("id-{name}"), *name));
        }
        let mut project = Project::new("p1", "TestProject");
        project.packages.push(package);
        project
    }

    fn relation(kind: RelationKind, client: &str, supplier: &str) -> Relation {
        Relation::new(format!("{client}-{supplier}"), "", kind, client, supplier)
    }

    fn synthesize(class: &Class, relations: &[Relation]) -> String {
        synthesize_with(class, relations, GeneratorConfig::default())
    }

    fn synthesize_with(class: &Class, relations: &[Relation], config: GeneratorConfig) -> String {
        let project = project_with(&["Client", "Service", "Repository", "Item", "Child", "Base"]);
        let imports = ImportResolver::new(&project, Some("output")).unwrap();
        let refs: Vec<&Relation> = relations.iter().collect();
        ClassSynthesizer::new(&imports, &config)
            .synthesize(class, &refs)
            .unwrap()
    }

    #[test]
    fn properties_become_constructor_parameters() {
        let mut class = Class::new("c1", "TestClass");
        class
            .properties
            .push(Property::new("p1", "id", "String", Visibility::Private));
        class
            .properties
            .push(Property::new("p2", "name", "String", Visibility::Public));

        let code = synthesize(&class, &[]);
        assert_eq!(
            code,
            "class TestClass:\n    def __init__(self, id: str, name: str):\n        self._id = id\n        self.name = name\n"
        );
    }

    #[test]
    fn association_is_optional_parameter() {
        let class = Class::new("c1", "Client");
        let code = synthesize(
            &class,
            &[relation(RelationKind::Association, "Client", "Service")],
        );

        assert!(code.starts_with("from output.TestProject.Test.Service import Service\n\n\nclass Client:\n"));
        assert!(code.contains("def __init__(self, service: Service | None = None):"));
        assert!(code.contains("self._service = service"));
    }

    #[test]
    fn repeated_suppliers_get_suffixed_names() {
        let class = Class::new("c1", "Client");
        let code = synthesize(
            &class,
            &[
                relation(RelationKind::Association, "Client", "Service"),
                relation(RelationKind::Association, "Client", "Service"),
            ],
        );

        assert!(code.contains(
            "def __init__(self, service: Service | None = None, service1: Service | None = None):"
        ));
        assert!(code.contains("self._service = service\n"));
        assert!(code.contains("self._service1 = service1\n"));
        assert_eq!(code.matches("import Service").count(), 1);
    }

    #[test]
    fn relation_names_avoid_property_names() {
        let mut class = Class::new("c1", "Client");
        class
            .properties
            .push(Property::new("p1", "service", "String", Visibility::Public));
        let code = synthesize(
            &class,
            &[relation(RelationKind::Composition, "Client", "Service")],
        );

        assert!(code.contains("def __init__(self, service: str):"));
        assert!(code.contains("self.service = service\n"));
        assert!(code.contains("self._service1 = Service()"));
    }

    #[test]
    fn receiver_name_is_reserved() {
        let mut class = Class::new("c1", "Node");
        class
            .properties
            .push(Property::new("p1", "self", "String", Visibility::Public));
        let code = synthesize(
            &class,
            &[relation(RelationKind::Association, "Node", "Self")],
        );

        assert!(!code.contains("(self, self,"));
        assert!(code.contains("def __init__(self, self1: str, self2: Self | None = None):"));
        assert!(code.contains("self.self1 = self1\n"));
        assert!(code.contains("self._self2 = self2\n"));
    }

    #[test]
    fn relation_attributes_avoid_property_attributes() {
        let mut class = Class::new("c1", "Node");
        class
            .properties
            .push(Property::new("p1", "_service", "String", Visibility::Public));
        class
            .properties
            .push(Property::new("p2", "item", "String", Visibility::Private));
        let code = synthesize(
            &class,
            &[
                relation(RelationKind::Composition, "Node", "Service"),
                relation(RelationKind::Association, "Node", "Item"),
            ],
        );

        assert_eq!(code.matches("self._service =").count(), 1);
        assert!(code.contains("self._service = _service\n"));
        assert!(code.contains("self._service1 = Service()"));
        assert_eq!(code.matches("self._item =").count(), 1);
        assert!(code.contains("item1: Item | None = None"));
        assert!(code.contains("self._item1 = item1"));
    }

    #[test]
    fn keyword_suppliers_get_trailing_underscore() {
        let class = Class::new("c1", "Client");
        let code = synthesize(
            &class,
            &[relation(RelationKind::Association, "Client", "Global")],
        );

        assert!(code.contains("def __init__(self, global_: Global | None = None):"));
        assert!(code.contains("self._global_ = global_"));
    }

    #[test]
    fn aggregation_is_optional_list() {
        let class = Class::new("c1", "Client");
        let code = synthesize(
            &class,
            &[relation(RelationKind::Aggregation, "Client", "Item")],
        );

        assert!(code.contains("items: list[Item] | None = None"));
        assert!(code.contains("self._items = items or []"));
    }

    #[test]
    fn composition_constructs_without_parameter() {
        let class = Class::new("c1", "Client");
        let code = synthesize(
            &class,
            &[relation(RelationKind::Composition, "Client", "Child")],
        );

        assert!(code.contains("def __init__(self):\n        self._child = Child()"));
        assert!(code.contains("from output.TestProject.Test.Child import Child"));
    }

    #[test]
    fn dependency_contributes_nothing() {
        let class = Class::new("c1", "Client");
        let code = synthesize(
            &class,
            &[relation(RelationKind::Dependency, "Client", "Service")],
        );

        assert_eq!(code, "class Client:\n    pass\n");
    }

    #[test]
    fn inheritance_builds_base_list() {
        let class = Class::new("c1", "Client");
        let code = synthesize(
            &class,
            &[
                relation(RelationKind::Generalization, "Client", "Base"),
                relation(RelationKind::Realization, "Client", "Service"),
                relation(RelationKind::Generalization, "Client", "Base"),
            ],
        );

        assert!(code.contains("class Client(Base, Service):\n    pass\n"));
        assert!(code.starts_with(
            "from output.TestProject.Test.Base import Base\nfrom output.TestProject.Test.Service import Service\n\n\n"
        ));
        assert!(!code.contains("__init__"));
    }

    #[test]
    fn imports_are_sorted_and_unresolved_dropped() {
        let mut class = Class::new("c1", "Client");
        class
            .properties
            .push(Property::new("p1", "svc", "Service", Visibility::Public));
        class
            .properties
            .push(Property::new("p2", "ghost", "Phantom", Visibility::Public));
        class
            .properties
            .push(Property::new("p3", "me", "Client", Visibility::Public));
        let code = synthesize(
            &class,
            &[relation(RelationKind::Association, "Client", "Item")],
        );

        let imports: Vec<_> = code.lines().filter(|l| l.starts_with("from ")).collect();
        assert_eq!(
            imports,
            vec![
                "from output.TestProject.Test.Item import Item",
                "from output.TestProject.Test.Service import Service",
            ]
        );
        assert!(code.contains("ghost: Phantom"));
    }

    #[test]
    fn methods_follow_constructor() {
        let mut class = Class::new("c1", "TestClass");
        class
            .properties
            .push(Property::new("p1", "count", "Integer", Visibility::Private));

        let mut op = Operation::new("o1", "do_something", Visibility::Public);
        op.parameters.push(Parameter::new(
            "a1",
            "value",
            "String",
            ParameterDirection::In,
        ));
        class.operations.push(op);

        let mut op = Operation::new("o2", "get_result", Visibility::Public);
        op.parameters.push(Parameter::returning("a2", "Integer"));
        class.operations.push(op);

        let code = synthesize(&class, &[]);
        assert_eq!(
            code,
            "class TestClass:\n    def __init__(self, count: int):\n        self._count = count\n\n    def do_something(self, value: str) -> None:\n        pass\n\n    def get_result(self) -> int:\n        pass\n"
        );
    }

    #[test]
    fn untyped_members_skip_annotations() {
        let mut class = Class::new("c1", "Loose");
        class
            .properties
            .push(Property::new("p1", "anything", "", Visibility::Protected));
        let mut op = Operation::new("o1", "guess", Visibility::Public);
        op.parameters
            .push(Parameter::new("a1", "hint", "", ParameterDirection::In));
        op.parameters.push(Parameter::returning("a2", ""));
        class.operations.push(op);

        let code = synthesize(&class, &[]);
        assert!(code.contains("def __init__(self, anything):"));
        assert!(code.contains("self.anything = anything"));
        assert!(code.contains("def guess(self, hint):"));
    }

    #[test]
    fn empty_class_has_placeholder_body() {
        let code = synthesize(&Class::new("c1", "EmptyClass"), &[]);
        assert_eq!(code, "class EmptyClass:\n    pass\n");
    }

    #[test]
    fn snake_case_member_naming() {
        let class = Class::new("c1", "Client");
        let config = GeneratorConfig {
            member_naming: MemberNaming::SnakeCase,
            indent: 2,
            ..GeneratorConfig::default()
        };
        let mut project = project_with(&["Client"]);
        project.packages[0]
            .classes
            .push(Class::new("c9", "UserRepository"));
        let imports = ImportResolver::new(&project, None).unwrap();
        let relations = [relation(RelationKind::Aggregation, "Client", "UserRepository")];
        let refs: Vec<&Relation> = relations.iter().collect();

        let code = ClassSynthesizer::new(&imports, &config)
            .synthesize(&class, &refs)
            .unwrap();
        assert!(code.contains("from TestProject.Test.UserRepository import UserRepository"));
        assert!(code.contains(
            "  def __init__(self, user_repositories: list[UserRepository] | None = None):\n    self._user_repositories = user_repositories or []"
        ));
    }

    #[test]
    fn foreign_relation_is_rejected() {
        let project = project_with(&["Client", "Service"]);
        let imports = ImportResolver::new(&project, None).unwrap();
        let config = GeneratorConfig::default();
        let stray = relation(RelationKind::Association, "Service", "Client");

        let err = ClassSynthesizer::new(&imports, &config)
            .synthesize(&Class::new("c1", "Client"), &[&stray])
            .unwrap_err();
        assert!(matches!(err, Error::ForeignRelation { ref client, .. } if client == "Service"));
    }
}
