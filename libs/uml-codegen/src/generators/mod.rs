//! Code generators for different programming languages
//!
//! Each language has its own module that implements the `Generator` trait.

pub mod python;

use crate::error::Result;
use std::collections::BTreeMap;
use umlgen_model::Project;

/// Trait that all language generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate code from the syntax tree
    fn generate(&self, project: &Project) -> Result<Self::Output>;
}

/// How relation-derived member names are built from the supplier class name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MemberNaming {
    /// `UserRepository` -> `userrepository`
    #[default]
    Lowercase,
    /// `UserRepository` -> `user_repository`
    SnakeCase,
}

/// Configuration options for code generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root module prepended to every import path (usually the output directory name)
    pub module_prefix: Option<String>,
    /// Model primitive type name -> native type name; these are never imported
    pub primitive_types: BTreeMap<String, String>,
    /// Naming of relation-derived constructor parameters and members
    pub member_naming: MemberNaming,
    /// Whether to emit `__init__.py` package markers
    pub package_markers: bool,
    /// Spaces per indentation level
    pub indent: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_prefix: None,
            primitive_types: default_primitive_types(),
            member_naming: MemberNaming::default(),
            package_markers: false,
            indent: 4,
        }
    }
}

impl GeneratorConfig {
    pub fn is_primitive(&self, type_name: &str) -> bool {
        self.primitive_types.contains_key(type_name)
    }

    /// Native spelling of a type reference
    pub fn native_type<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.primitive_types
            .get(type_name)
            .map(String::as_str)
            .unwrap_or(type_name)
    }
}

fn default_primitive_types() -> BTreeMap<String, String> {
    [
        ("String", "str"),
        ("Integer", "int"),
        ("Float", "float"),
        ("Real", "float"),
        ("Boolean", "bool"),
        ("UnlimitedNatural", "int"),
    ]
    .into_iter()
    .map(|(model, native)| (model.to_string(), native.to_string()))
    .collect()
}
