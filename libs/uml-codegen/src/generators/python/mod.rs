//! Python skeleton generator
//!
//! Mirrors the package tree as a directory tree: one directory per package
//! (nested under the project directory) and one `<ClassName>.py` module per
//! class. Nothing touches the filesystem here; see [`crate::utils::write_tree`].

mod class;

pub use class::ClassSynthesizer;

use super::{Generator, GeneratorConfig};
use crate::error::Result;
use crate::imports::ImportResolver;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use umlgen_model::{Package, Project, Relation};

const PACKAGE_MARKER: &str = "__init__.py";

/// A generated source file, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Directories and files to create, parents before children
#[derive(Debug, Clone, Default)]
pub struct PythonOutput {
    pub directories: Vec<PathBuf>,
    pub files: Vec<GeneratedFile>,
}

impl PythonOutput {
    /// Files that hold a class, package markers excluded
    pub fn class_files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files
            .iter()
            .filter(|file| file.path.file_name().is_some_and(|name| name != PACKAGE_MARKER))
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path.as_ref())
    }
}

pub struct PythonGenerator {
    config: GeneratorConfig,
}

impl PythonGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn new_default() -> Self {
        Self::new(GeneratorConfig::default())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl Generator for PythonGenerator {
    type Output = PythonOutput;

    fn generate(&self, project: &Project) -> Result<PythonOutput> {
        let imports = ImportResolver::new(project, self.config.module_prefix.as_deref())?;

        let mut relations: HashMap<&str, Vec<&Relation>> = HashMap::new();
        for relation in project.relations() {
            relations
                .entry(relation.client.as_str())
                .or_default()
                .push(relation);
        }

        let materializer = TreeMaterializer {
            synthesizer: ClassSynthesizer::new(&imports, &self.config),
            relations,
            package_markers: self.config.package_markers,
        };

        let mut output = PythonOutput::default();
        let root = PathBuf::from(&project.name);
        if self.config.package_markers && !project.packages.is_empty() {
            output.directories.push(root.clone());
            output.files.push(GeneratedFile {
                path: root.join(PACKAGE_MARKER),
                contents: String::new(),
            });
        }
        for package in &project.packages {
            materializer.visit(package, &root, &mut output)?;
        }

        debug!(
            project = %project.name,
            directories = output.directories.len(),
            files = output.files.len(),
            "generated python tree"
        );
        Ok(output)
    }
}

struct TreeMaterializer<'a> {
    synthesizer: ClassSynthesizer<'a>,
    relations: HashMap<&'a str, Vec<&'a Relation>>,
    package_markers: bool,
}

impl TreeMaterializer<'_> {
    fn visit(&self, package: &Package, parent: &Path, output: &mut PythonOutput) -> Result<()> {
        let dir = parent.join(&package.name);
        output.directories.push(dir.clone());

        if self.package_markers {
            output.files.push(GeneratedFile {
                path: dir.join(PACKAGE_MARKER),
                contents: String::new(),
            });
        }

        for class in &package.classes {
            let relations = self
                .relations
                .get(class.name.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let contents = self.synthesizer.synthesize(class, relations)?;
            output.files.push(GeneratedFile {
                path: dir.join(format!("{}.py", class.name)),
                contents,
            });
        }

        for subpackage in &package.subpackages {
            self.visit(subpackage, &dir, output)?;
        }

        Ok(())
    }
}
