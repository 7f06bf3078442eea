//! Finding Java sources for `jnadec batch` and naming their outputs.

use std::path::{Path, PathBuf};

/// Extension of translated files.
pub const OUTPUT_EXTENSION: &str = "nako";

/// Recursively discover all `.java` files under `root`.
///
/// Returns paths relative to `root`, sorted for determinism. Hidden files
/// and directories (names starting with `.`) are skipped.
pub fn discover_java_files(root: &Path) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    discover_recursive(root, root, &mut files)
        .map_err(|e| format!("Failed to walk directory '{}': {}", root.display(), e))?;
    files.sort();
    Ok(files)
}

fn discover_recursive(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        if entry_path.is_dir() {
            discover_recursive(root, &entry_path, files)?;
        } else if entry_path.extension().and_then(|e| e.to_str()) == Some("java") {
            let relative = entry_path
                .strip_prefix(root)
                .unwrap_or(&entry_path)
                .to_path_buf();
            files.push(relative);
        }
    }
    Ok(())
}

/// Where the translation of `relative` (a path under `root`) is written:
/// next to the source, or at the same relative path under `out_dir`.
///
/// - `A.java`, no out dir -> `<root>/A.nako`
/// - `pkg/A.java`, out dir `gen` -> `gen/pkg/A.nako`
pub fn output_path(root: &Path, relative: &Path, out_dir: Option<&Path>) -> PathBuf {
    out_dir
        .unwrap_or(root)
        .join(relative)
        .with_extension(OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_nested_sources_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("app/model")).unwrap();
        std::fs::write(root.join("Main.java"), "").unwrap();
        std::fs::write(root.join("app/Service.java"), "").unwrap();
        std::fs::write(root.join("app/model/User.java"), "").unwrap();
        std::fs::write(root.join("app/notes.txt"), "").unwrap();

        let files = discover_java_files(root).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("Main.java"),
                PathBuf::from("app/Service.java"),
                PathBuf::from("app/model/User.java"),
            ]
        );
    }

    #[test]
    fn skips_hidden_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join(".git")).unwrap();
        std::fs::write(root.join(".git/Hook.java"), "").unwrap();
        std::fs::write(root.join(".Scratch.java"), "").unwrap();
        std::fs::write(root.join("A.java"), "").unwrap();

        assert_eq!(discover_java_files(root).unwrap(), vec![PathBuf::from("A.java")]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover_java_files(&tmp.path().join("nope")).unwrap_err();
        assert!(err.contains("Failed to walk directory"));
    }

    #[test]
    fn output_paths() {
        let root = Path::new("/src");
        assert_eq!(
            output_path(root, Path::new("A.java"), None),
            PathBuf::from("/src/A.nako")
        );
        assert_eq!(
            output_path(root, Path::new("pkg/A.java"), Some(Path::new("gen"))),
            PathBuf::from("gen/pkg/A.nako")
        );
    }
}
