use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Extensions treated as C/C++ sources.
pub const CPP_EXTENSIONS: &[&str] = &["cpp", "cc", "cxx", "c", "hpp", "hh", "h"];

pub struct SourceLoader;

impl SourceLoader {
    /// Read the given files. Returns (path, content) pairs in input order.
    pub fn load_files(paths: &[String]) -> Result<Vec<(String, String)>> {
        paths
            .iter()
            .map(|p| {
                let content = fs::read_to_string(p)
                    .with_context(|| format!("Failed to read file {}", p))?;
                Ok((p.clone(), content))
            })
            .collect()
    }

    /// Collect every C/C++ file under `dir`, sorted by path.
    pub fn load_folder(dir: &Path) -> Result<Vec<(String, String)>> {
        let mut files = Vec::new();
        Self::collect_recursive(dir, &mut files)?;
        files.sort_by(|a, b| a.0.cmp(&b.0));
        files.dedup_by(|a, b| a.0 == b.0);
        debug!(dir = %dir.display(), count = files.len(), "collected sources");
        Ok(files)
    }

    pub fn is_cpp_source(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| CPP_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    fn collect_recursive(dir: &Path, out: &mut Vec<(String, String)>) -> Result<()> {
        if dir.ends_with("target") || dir.ends_with(".git") || dir.ends_with("build") {
            return Ok(());
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                Self::collect_recursive(&path, out)?;
            } else if Self::is_cpp_source(&path) {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read file {}", path.display()))?;
                out.push((path.display().to_string(), content));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.cpp"), "int b = 2;").unwrap();
        fs::write(dir.path().join("a.h"), "struct A {};").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("build").join("gen.cpp"), "int g;").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.cc"), "int c;").unwrap();

        let files = SourceLoader::load_folder(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|(p, _)| Path::new(p).file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.h", "b.cpp", "c.cc"]);
    }

    #[test]
    fn test_load_files_reports_missing_path() {
        let err = SourceLoader::load_files(&["/no/such/file.cpp".to_string()]).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.cpp"));
    }

    #[test]
    fn test_is_cpp_source() {
        assert!(SourceLoader::is_cpp_source(Path::new("x.CPP")));
        assert!(SourceLoader::is_cpp_source(Path::new("dir/y.hpp")));
        assert!(!SourceLoader::is_cpp_source(Path::new("z.rs")));
        assert!(!SourceLoader::is_cpp_source(Path::new("Makefile")));
    }
}
