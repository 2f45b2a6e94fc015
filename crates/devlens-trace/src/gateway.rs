use crate::error::{Error, Result};
use devlens_types::{SourceExtract, SourceLine};
use std::fs;
use std::path::{Path, PathBuf};

/// Guarded access to source files referenced by trace frames.
///
/// Reads are only permitted from a fixed allow-list of roots: the project
/// root plus the dependency and toolchain installation directories. The
/// policy checks run in a fixed order and short-circuit, so the first
/// failing rule determines the error kind the caller sees.
#[derive(Debug, Clone)]
pub struct SourceGateway {
    project_root: PathBuf,
    roots: Vec<PathBuf>,
}

impl SourceGateway {
    /// Gateway with the default allow-list: the project root, the cargo
    /// registry cache and the rustup toolchain directory.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let mut roots = vec![project_root.clone()];

        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            roots.push(home.join(".cargo").join("registry"));
            roots.push(home.join(".rustup").join("toolchains"));
        }

        Self { project_root, roots }
    }

    /// Extend the allow-list with additional roots.
    pub fn with_roots(mut self, extra: impl IntoIterator<Item = PathBuf>) -> Self {
        self.roots.extend(extra);
        self
    }

    pub fn allowed_roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load a file and build a [`SourceExtract`] with the requested line
    /// highlighted.
    ///
    /// Policy, in order: non-empty path and positive line; existing regular
    /// file; canonical resolution (following symlinks); containment in an
    /// allow-listed root; non-empty content. Failure is always one of the
    /// structured [`Error`] kinds, never a raw I/O error.
    pub fn extract(&self, file: &str, line: i64) -> Result<SourceExtract> {
        if file.is_empty() {
            return Err(Error::InvalidRequest("file must not be empty".to_string()));
        }
        if line < 1 {
            return Err(Error::InvalidRequest(format!(
                "line must be a positive integer, got {}",
                line
            )));
        }

        let path = Path::new(file);
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(Error::NotFound(path.to_path_buf())),
        }

        // Realpath defeats traversal via symlinks that point outside the
        // allowed roots; containment is checked on the resolved path only.
        let canonical = fs::canonicalize(path).map_err(Error::Read)?;

        if !self.is_allowed(&canonical) {
            return Err(Error::AccessDenied(canonical));
        }

        let content = fs::read_to_string(&canonical).map_err(Error::Read)?;
        let raw_lines: Vec<&str> = content.lines().collect();
        if raw_lines.is_empty() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let total_lines = raw_lines.len() as u32;
        let line = line as u32;
        let lines = raw_lines
            .iter()
            .enumerate()
            .map(|(idx, content)| {
                let number = idx as u32 + 1;
                SourceLine {
                    number,
                    content: (*content).to_string(),
                    highlighted: number == line,
                }
            })
            .collect();

        Ok(SourceExtract {
            file: self.display_path(&canonical, file),
            line_number: line,
            total_lines,
            lines,
        })
    }

    fn is_allowed(&self, canonical: &Path) -> bool {
        self.roots.iter().any(|root| {
            // Roots that do not exist on disk cannot be canonicalized and
            // are skipped rather than trusted lexically.
            fs::canonicalize(root)
                .map(|r| canonical.starts_with(&r))
                .unwrap_or(false)
        })
    }

    // Relative to the project root when contained there; otherwise the path
    // the caller asked for.
    fn display_path(&self, canonical: &Path, requested: &str) -> String {
        if let Ok(root) = fs::canonicalize(&self.project_root)
            && let Ok(rel) = canonical.strip_prefix(&root)
        {
            return rel.to_string_lossy().into_owned();
        }
        requested.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(path: &Path, content: &str) {
        let mut f = File::create(path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    fn gateway_for(root: &Path) -> SourceGateway {
        // Bare gateway without the home-derived roots so tests only depend
        // on the temp tree.
        SourceGateway {
            project_root: root.to_path_buf(),
            roots: vec![root.to_path_buf()],
        }
    }

    #[test]
    fn test_rejects_non_positive_line_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway_for(dir.path());

        for line in [0, -1, -100] {
            match gw.extract("/definitely/not/there.rs", line) {
                Err(Error::InvalidRequest(_)) => {}
                other => panic!("expected InvalidRequest, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_rejects_empty_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway_for(dir.path());

        match gw.extract("", 1) {
            Err(Error::InvalidRequest(_)) => {}
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_not_found_not_access_denied() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway_for(dir.path());

        // Outside the allow-list AND missing: existence is checked first.
        match gw.extract("/no/such/file.rs", 1) {
            Err(Error::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let gw = gateway_for(dir.path());

        match gw.extract(&dir.path().to_string_lossy(), 1) {
            Err(Error::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_file_outside_roots_is_access_denied() {
        let allowed = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        write_file(&secret, "top secret\n");

        let gw = gateway_for(allowed.path());
        match gw.extract(&secret.to_string_lossy(), 1) {
            Err(Error::AccessDenied(_)) => {}
            other => panic!("expected AccessDenied, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_root_to_outside_target_is_access_denied() {
        let allowed = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let target = outside.path().join("shadow.rs");
        write_file(&target, "fn hidden() {}\n");

        let link = allowed.path().join("innocent.rs");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let gw = gateway_for(allowed.path());
        match gw.extract(&link.to_string_lossy(), 1) {
            Err(Error::AccessDenied(_)) => {}
            other => panic!("expected AccessDenied via symlink, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.rs");
        write_file(&empty, "");

        let gw = gateway_for(dir.path());
        match gw.extract(&empty.to_string_lossy(), 1) {
            Err(Error::NotFound(_)) => {}
            other => panic!("expected NotFound for empty file, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_highlights_exactly_the_requested_line() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ten.rs");
        let content: String = (1..=10).map(|i| format!("line {}\n", i)).collect();
        write_file(&file, &content);

        let gw = gateway_for(dir.path());
        let extract = gw.extract(&file.to_string_lossy(), 5).unwrap();

        assert_eq!(extract.total_lines, 10);
        assert_eq!(extract.lines.len(), 10);
        let highlighted: Vec<u32> = extract
            .lines
            .iter()
            .filter(|l| l.highlighted)
            .map(|l| l.number)
            .collect();
        assert_eq!(highlighted, vec![5]);
        assert_eq!(extract.lines[4].content, "line 5");
    }

    #[test]
    fn test_out_of_range_line_highlights_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("three.rs");
        write_file(&file, "a\nb\nc\n");

        let gw = gateway_for(dir.path());
        let extract = gw.extract(&file.to_string_lossy(), 50).unwrap();

        assert_eq!(extract.total_lines, 3);
        assert!(extract.highlighted_line().is_none());
    }

    #[test]
    fn test_display_path_is_relative_to_project_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        let file = dir.path().join("src").join("main.rs");
        write_file(&file, "fn main() {}\n");

        let gw = gateway_for(dir.path());
        let extract = gw.extract(&file.to_string_lossy(), 1).unwrap();
        assert_eq!(extract.file, "src/main.rs");
    }
}
