//! UML Class Skeleton Generator
//!
//! Turns a UML class model into a tree of class skeleton source files, one
//! directory per package and one module per class.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Reader**: Decodes an XMI document into the syntax tree (`umlgen-xmi`)
//! 2. **Syntax tree**: Language-agnostic class model (`umlgen-model`)
//! 3. **Generators**: Language-specific source trees built from the syntax tree
//!
//! Generation is pure; [`utils::write_tree`] is the only step that touches the
//! filesystem, and it runs after the whole tree has been built.

pub mod error;
pub mod generators;
pub mod imports;
pub mod naming;
pub mod utils;

use std::fs;
use std::path::Path;

use anyhow::Context;
use generators::python::PythonGenerator;
use generators::GeneratorConfig;
use tracing::info;
use umlgen_model::Project;
use umlgen_xmi::XmiReader;

pub use error::{Error, Result};

/// Main entry point for code generation
pub struct CodeGenerator {
    project: Project,
}

impl CodeGenerator {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// Create a new code generator from an XMI document
    pub fn from_xmi(reader: &XmiReader, input: &str) -> Result<Self> {
        let project = reader.read(input)?;
        Ok(Self { project })
    }

    /// Get the syntax tree
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Generate code for a specific language
    pub fn generate<G: generators::Generator>(&self, generator: G) -> Result<G::Output> {
        generator.generate(&self.project)
    }
}

/// Run the Python generator for an already-read model and write the tree
/// below `output_dir`.
///
/// Returns the number of generated class modules.
pub fn generate_python_into(
    codegen: &CodeGenerator,
    output_dir: &Path,
    mut config: GeneratorConfig,
) -> anyhow::Result<usize> {
    if config.module_prefix.is_none() {
        config.module_prefix = output_root_name(output_dir);
    }

    let generator = PythonGenerator::new(config);
    let output = codegen
        .generate(generator)
        .context("running Python generator")?;

    utils::write_tree(output_dir, &output)?;

    let count = output.class_files().count();
    info!(
        classes = count,
        output = %output_dir.display(),
        "class skeletons written"
    );
    Ok(count)
}

/// Convenience helper to run the Python generator from an XMI file.
///
/// Nothing is written unless the whole document reads cleanly.
/// Returns the number of generated class modules.
pub fn generate_python_from_file(
    reader: &XmiReader,
    xmi_path: &Path,
    output_dir: &Path,
    config: GeneratorConfig,
) -> anyhow::Result<usize> {
    let input = fs::read_to_string(xmi_path)
        .with_context(|| format!("reading XMI document {}", xmi_path.display()))?;

    let codegen = CodeGenerator::from_xmi(reader, &input)
        .with_context(|| format!("reading UML model from {}", xmi_path.display()))?;

    generate_python_into(&codegen, output_dir, config)
}

/// Final component of `output_dir`, used as the root of every import path
fn output_root_name(output_dir: &Path) -> Option<String> {
    let name = match output_dir.file_name() {
        Some(name) => Some(name.to_os_string()),
        None => fs::canonicalize(output_dir)
            .ok()
            .and_then(|path| path.file_name().map(|name| name.to_os_string())),
    };
    name.map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn output_root_is_last_component() {
        assert_eq!(
            output_root_name(&PathBuf::from("build/output")).as_deref(),
            Some("output")
        );
        assert_eq!(output_root_name(Path::new("gen/")).as_deref(), Some("gen"));
    }

    #[test]
    fn from_xmi_reports_reader_errors() {
        let err = CodeGenerator::from_xmi(&XmiReader::default(), "<unclosed").err();
        assert!(matches!(err, Some(Error::Xmi(_))));
    }
}
