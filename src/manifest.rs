// src/manifest.rs
// =============================================================================
// Converts a pinned requirements file into a YAML dependency manifest.
//
//   # tooling            dependencies:
//   pandas==2.0.2   ->   - pandas==2.0.2
//                        - requests==2.31.0
//   requests==2.31.0
//
// Blank lines and comment lines are dropped; everything else is kept in
// file order, trimmed.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub dependencies: Vec<String>,
}

impl Manifest {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

pub fn convert_manifest<I, S>(lines: I) -> Manifest
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let dependencies = lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    Manifest { dependencies }
}

// Reads `input`, writes the YAML manifest to `output`, returns the manifest
pub fn convert_manifest_file(input: &Path, output: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(input).map_err(|e| ReportError::io(input, e))?;
    let manifest = convert_manifest(text.lines());

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
    }
    fs::write(output, manifest.to_yaml()?).map_err(|e| ReportError::io(output, e))?;

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_blank_and_comment_lines() {
        let manifest = convert_manifest(["# comment", "", "pkgA==1.0", "pkgB==2.0"]);
        assert_eq!(manifest.dependencies, vec!["pkgA==1.0", "pkgB==2.0"]);
    }

    #[test]
    fn test_trims_and_keeps_order() {
        let manifest = convert_manifest(["  zeta==1  ", "\t", "alpha==2", "   # indented comment"]);
        assert_eq!(manifest.dependencies, vec!["zeta==1", "alpha==2"]);
    }

    #[test]
    fn test_yaml_document() {
        let manifest = convert_manifest(["pkgA==1.0", "pkgB==2.0"]);
        assert_eq!(
            manifest.to_yaml().unwrap(),
            "dependencies:\n- pkgA==1.0\n- pkgB==2.0\n"
        );
    }

    #[test]
    fn test_convert_manifest_file() {
        let scratch = tempfile::tempdir().unwrap();
        let input = scratch.path().join("requirements.txt");
        let output = scratch.path().join("env").join("environment.yml");
        fs::write(&input, "# pinned\npandas==2.0.2\n\nrequests==2.31.0\n").unwrap();

        let manifest = convert_manifest_file(&input, &output).unwrap();
        assert_eq!(manifest.dependencies.len(), 2);

        let written: Manifest = serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, manifest);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let scratch = tempfile::tempdir().unwrap();
        let result = convert_manifest_file(
            &scratch.path().join("nope.txt"),
            &scratch.path().join("out.yml"),
        );
        assert!(matches!(result, Err(ReportError::Io { .. })));
    }
}
