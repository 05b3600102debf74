//! Definition file loading
//!
//! Reads `*.toml` definition files into a single `DefinitionFile`.
//! Directories are walked recursively in path order so the merged result
//! does not depend on the platform's directory listing order.

use std::fs;
use std::path::{Path, PathBuf};

use trigger_types::DefinitionFile;

use super::DefinitionError;

/// Load definitions from a single TOML file
pub fn load_definitions_from_file(path: &Path) -> Result<DefinitionFile, DefinitionError> {
    let content = fs::read_to_string(path).map_err(|source| DefinitionError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| DefinitionError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and merge every `*.toml` file under `dir`
pub fn load_definitions_from_dir(dir: &Path) -> Result<DefinitionFile, DefinitionError> {
    let mut files = Vec::new();
    collect_toml_files(dir, &mut files)?;
    files.sort();

    let mut merged = DefinitionFile::default();
    for path in files {
        let file = load_definitions_from_file(&path)?;
        tracing::debug!(
            path = %path.display(),
            triggers = file.triggers.len(),
            actions = file.actions.len(),
            conditions = file.conditions.len(),
            "loaded definition file"
        );
        merged.merge(file);
    }
    Ok(merged)
}

fn collect_toml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), DefinitionError> {
    let entries = fs::read_dir(dir).map_err(|source| DefinitionError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_toml_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOOR: &str = r#"
[[action]]
id = "open"
type = "set_variable"
variable = "open"
value = 1.0

[[trigger]]
id = "door"

[[trigger.actions]]
action = "open"
"#;

    const ALARM: &str = r#"
[[trigger]]
id = "alarm"
"#;

    #[test]
    fn loads_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("door.toml");
        fs::write(&path, DOOR).unwrap();

        let defs = load_definitions_from_file(&path).unwrap();
        assert_eq!(defs.triggers.len(), 1);
        assert_eq!(defs.actions.len(), 1);
    }

    #[test]
    fn merges_directory_recursively_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b_door.toml"), DOOR).unwrap();
        fs::write(dir.path().join("nested").join("alarm.toml"), ALARM).unwrap();
        fs::write(dir.path().join("notes.txt"), "not toml").unwrap();

        let defs = load_definitions_from_dir(dir.path()).unwrap();
        let ids: Vec<_> = defs.triggers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["door", "alarm"]);
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[[trigger]\nid = ").unwrap();

        let err = load_definitions_from_file(&path).unwrap_err();
        assert!(matches!(err, DefinitionError::ParseToml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_definitions_from_dir(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, DefinitionError::ReadDir { .. }));
    }
}
