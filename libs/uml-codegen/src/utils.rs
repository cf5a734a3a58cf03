use crate::generators::python::PythonOutput;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write a generated tree below `output_dir`.
/// Creates the directory (and every package directory) if it does not exist.
pub fn write_tree(output_dir: &Path, output: &PythonOutput) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    for dir in &output.directories {
        let path = output_dir.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("creating package directory {}", path.display()))?;
    }

    for file in &output.files {
        let path = output_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating package directory {}", parent.display()))?;
        }
        fs::write(&path, &file.contents)
            .with_context(|| format!("writing generated file {}", path.display()))?;
    }

    Ok(())
}
