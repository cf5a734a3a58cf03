//! Generate Python class skeletons from a UML model
//!
//! Usage:
//!   umlgen <model.xmi> <output-dir> [--package-markers] [--member-naming snake-case]
//!   umlgen <model.xmi> <output-dir> --print-ast --normalize normalized.xmi

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use umlgen_codegen::generators::{GeneratorConfig, MemberNaming};
use umlgen_codegen::{generate_python_into, CodeGenerator};
use umlgen_xmi::{Namespaces, XmiReader, XmiWriter, UML_NAMESPACE, XMI_NAMESPACE};

#[derive(Parser, Debug)]
#[clap(name = "umlgen")]
#[clap(about = "Generate Python class skeletons from a UML model in XMI format")]
struct Args {
    /// XMI document to read
    #[clap(value_parser = existing_file)]
    xmi_path: PathBuf,

    /// Directory receiving the generated tree (created if absent)
    #[clap(value_parser = output_directory)]
    output_dir: PathBuf,

    /// Debug-level logging unless RUST_LOG is set
    #[clap(short, long)]
    verbose: bool,

    /// Print the parsed model as JSON to stdout
    #[clap(long)]
    print_ast: bool,

    /// Also write the parsed model back out as normalized XMI
    #[clap(long, value_name = "PATH")]
    normalize: Option<PathBuf>,

    /// Namespace URI of UML meta-attributes
    #[clap(long, default_value = UML_NAMESPACE)]
    uml_namespace: String,

    /// Namespace URI of XMI meta-attributes
    #[clap(long, default_value = XMI_NAMESPACE)]
    xmi_namespace: String,

    /// How constructor members derived from relations are named
    #[clap(long, value_enum, default_value_t = MemberNaming::Lowercase)]
    member_naming: MemberNaming,

    /// Emit __init__.py in every generated package directory
    #[clap(long)]
    package_markers: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let namespaces = Namespaces::new(&args.uml_namespace, &args.xmi_namespace);
    debug!(?namespaces, "namespace search order");

    let input = fs::read_to_string(&args.xmi_path)
        .with_context(|| format!("reading XMI document {}", args.xmi_path.display()))?;
    let codegen = CodeGenerator::from_xmi(&XmiReader::new(namespaces.clone()), &input)
        .with_context(|| format!("reading UML model from {}", args.xmi_path.display()))?;

    let project = codegen.project();
    info!(
        project = %project.name,
        packages = project.all_packages().len(),
        classes = project.classes().count(),
        relations = project.relations().count(),
        "model loaded"
    );

    if args.print_ast {
        let json = serde_json::to_string_pretty(project).context("serializing syntax tree")?;
        println!("{json}");
    }

    if let Some(path) = &args.normalize {
        let document = XmiWriter::new(namespaces)
            .write(project)
            .context("serializing normalized XMI")?;
        fs::write(path, document)
            .with_context(|| format!("writing normalized XMI {}", path.display()))?;
        info!(path = %path.display(), "normalized XMI written");
    }

    let config = GeneratorConfig {
        member_naming: args.member_naming,
        package_markers: args.package_markers,
        ..GeneratorConfig::default()
    };
    generate_python_into(&codegen, &args.output_dir, config)?;
    Ok(())
}

fn existing_file(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{value} does not exist or is not a file"))
    }
}

fn output_directory(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if is_non_directory(&path) {
        Err(format!("{value} exists and is not a directory"))
    } else {
        Ok(path)
    }
}

fn is_non_directory(path: &Path) -> bool {
    path.exists() && !path.is_dir()
}
