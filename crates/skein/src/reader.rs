//! Project file reading: the extension gate and the project-information
//! peek.
//!
//! Only two extensions have ever carried this format (`.put` and the
//! plain `.xml` export); anything else is rejected by path alone, before
//! any content is read.

use std::fs;
use std::path::Path;

use log::debug;

use skein_parser::vocabulary::ELEMENT_PROJECT;
use skein_parser::{ParseError, xml};

use crate::error::SkeinError;

/// The recognized legacy project file extensions.
const SUPPORTED_EXTENSIONS: [&str; 2] = ["put", "xml"];

/// Project-level metadata, readable without assembling any document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    /// Raw schema version string from the project root.
    pub version: String,
    /// Source-code directory recorded by the authoring tool.
    pub code_path: String,
    /// The file the information came from.
    pub file_name: String,
}

/// Fail fast when the path cannot be a project file.
pub(crate) fn ensure_supported_extension(path: &Path) -> Result<(), SkeinError> {
    let supported = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        });
    if supported {
        Ok(())
    } else {
        Err(SkeinError::UnsupportedFileType {
            path: path.to_path_buf(),
        })
    }
}

/// Read the whole file into memory, gated on extension.
pub(crate) fn read_raw_xml(path: &Path) -> Result<String, SkeinError> {
    ensure_supported_extension(path)?;
    debug!(path = path.display().to_string(); "Reading project file");
    Ok(fs::read_to_string(path)?)
}

/// Read only the project-level metadata from a file: schema version and
/// code path, without assembling any document.
///
/// # Errors
///
/// Fails with [`SkeinError::UnsupportedFileType`] for a wrong extension,
/// or with an I/O or parse error when the file cannot be read as a
/// project at all.
pub fn read_project_info(path: impl AsRef<Path>) -> Result<ProjectInfo, SkeinError> {
    let path = path.as_ref();
    let raw = read_raw_xml(path)?;

    let root = xml::parse_document(&raw)?;
    if root.name() != ELEMENT_PROJECT {
        return Err(SkeinError::Parse(ParseError::MalformedElement {
            element: root.name().to_string(),
            detail: format!("expected <{ELEMENT_PROJECT}> document root"),
        }));
    }

    Ok(ProjectInfo {
        version: root.required_attribute("version")?.to_string(),
        code_path: root.attribute("CodePath").unwrap_or_default().to_string(),
        file_name: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_gate() {
        assert!(ensure_supported_extension(Path::new("diagram.put")).is_ok());
        assert!(ensure_supported_extension(Path::new("diagram.xml")).is_ok());
        assert!(ensure_supported_extension(Path::new("diagram.XML")).is_ok());
        assert!(matches!(
            ensure_supported_extension(Path::new("diagram.drawio")),
            Err(SkeinError::UnsupportedFileType { .. })
        ));
        assert!(matches!(
            ensure_supported_extension(Path::new("no_extension")),
            Err(SkeinError::UnsupportedFileType { .. })
        ));
    }
}
