//! Class name → import path mapping.
//!
//! Built once per generation run by walking the package tree; immutable
//! afterwards. A class `X` in package `A/B` of project `P` generated under an
//! output directory named `out` maps to `out.P.A.B.X`.

use crate::error::{Error, Result};
use std::collections::HashMap;
use umlgen_model::{Package, Project};

#[derive(Debug, Clone, Default)]
pub struct ImportResolver {
    paths: HashMap<String, String>,
}

impl ImportResolver {
    /// Map every class of `project`. `root` is the name of the output root
    /// directory, prepended to every path when present.
    ///
    /// Class names must be unique across the project; a second declaration of
    /// the same name is rejected with [`Error::DuplicateClass`].
    pub fn new(project: &Project, root: Option<&str>) -> Result<Self> {
        let base = match root {
            Some(root) => format!("{}.{}", root, project.name),
            None => project.name.clone(),
        };

        let mut paths = HashMap::new();
        for package in &project.packages {
            map_package(&base, package, &mut paths)?;
        }

        Ok(Self { paths })
    }

    /// Import path of `class_name`
    pub fn resolve(&self, class_name: &str) -> Result<&str> {
        self.try_resolve(class_name)
            .ok_or_else(|| Error::UnresolvedClass(class_name.to_string()))
    }

    pub fn try_resolve(&self, class_name: &str) -> Option<&str> {
        self.paths.get(class_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn map_package(parent: &str, package: &Package, paths: &mut HashMap<String, String>) -> Result<()> {
    let package_path = format!("{}.{}", parent, package.name);

    for subpackage in &package.subpackages {
        map_package(&package_path, subpackage, paths)?;
    }

    for class in &package.classes {
        let path = format!("{}.{}", package_path, class.name);
        if let Some(first) = paths.get(&class.name) {
            return Err(Error::DuplicateClass {
                name: class.name.clone(),
                first: first.clone(),
                second: path,
            });
        }
        paths.insert(class.name.clone(), path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use umlgen_model::Class;

    fn package(name: &str, classes: &[&str], subpackages: Vec<Package>) -> Package {
        let mut package = Package::new(format!("pkg-{name}"), name);
        for class in classes {
            package
                .classes
                .push(Class::new(format!("cls-{class}"), *class));
        }
        package.subpackages = subpackages;
        package
    }

    fn sample_project() -> Project {
        let mut project = Project::new("p1", "Sample_Project");
        project.packages.push(package(
            "Core",
            &["ExampleService"],
            vec![package("TestSubpackage", &["TestSubclass"], vec![])],
        ));
        project
            .packages
            .push(package("Data", &["UserRepository"], vec![]));
        project
    }

    #[test]
    fn maps_every_class() {
        let resolver = ImportResolver::new(&sample_project(), Some("output")).unwrap();

        assert_eq!(resolver.len(), 3);
        assert_eq!(
            resolver.resolve("ExampleService").unwrap(),
            "output.Sample_Project.Core.ExampleService"
        );
        assert_eq!(
            resolver.resolve("UserRepository").unwrap(),
            "output.Sample_Project.Data.UserRepository"
        );
        assert_eq!(
            resolver.resolve("TestSubclass").unwrap(),
            "output.Sample_Project.Core.TestSubpackage.TestSubclass"
        );
    }

    #[test]
    fn deep_path_ignores_sibling_order() {
        let chain = package(
            "A",
            &[],
            vec![package("B", &[], vec![package("C", &["X"], vec![])])],
        );

        let mut forward = Project::new("p", "P");
        forward.packages.push(package("Z", &["Other"], vec![]));
        forward.packages.push(chain.clone());

        let mut reversed = Project::new("p", "P");
        reversed.packages.push(chain);
        reversed.packages.push(package("Z", &["Other"], vec![]));

        for project in [forward, reversed] {
            let resolver = ImportResolver::new(&project, Some("root")).unwrap();
            assert_eq!(resolver.resolve("X").unwrap(), "root.P.A.B.C.X");
        }
    }

    #[test]
    fn without_root_paths_start_at_project() {
        let resolver = ImportResolver::new(&sample_project(), None).unwrap();
        assert_eq!(
            resolver.resolve("UserRepository").unwrap(),
            "Sample_Project.Data.UserRepository"
        );
    }

    #[test]
    fn unknown_class_is_unresolved() {
        let resolver = ImportResolver::new(&sample_project(), Some("output")).unwrap();
        assert!(resolver.try_resolve("Missing").is_none());
        assert!(matches!(
            resolver.resolve("Missing"),
            Err(Error::UnresolvedClass(name)) if name == "Missing"
        ));
    }

    #[test]
    fn duplicate_class_names_are_rejected() {
        let mut project = Project::new("p", "P");
        project.packages.push(package("A", &["Shared"], vec![]));
        project.packages.push(package("B", &["Shared"], vec![]));

        let err = ImportResolver::new(&project, None).unwrap_err();
        match err {
            Error::DuplicateClass {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "Shared");
                assert_eq!(first, "P.A.Shared");
                assert_eq!(second, "P.B.Shared");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_project_has_no_mappings() {
        let resolver = ImportResolver::new(&Project::new("p", "P"), Some("out")).unwrap();
        assert!(resolver.is_empty());
    }
}
