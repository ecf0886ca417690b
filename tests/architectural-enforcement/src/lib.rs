//! Architectural Enforcement Integration Tests
//!
//! Source scans that keep the wizard honest:
//! - No sleep() calls in production code (the wizard waits on I/O, the TUI on a frame interval)
//! - No blocking HTTP or sockets in production code
//!
//! The scanning helpers live here so each test file stays a list of rules.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source roots, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["wizard/core/src", "tui/src"];

/// Workspace root, resolved from this package's manifest directory
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// One offending line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// Trimmed source line
    pub line: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line_number, self.line)
    }
}

/// Scan every `.rs` file under the production roots for lines containing any
/// of `needles`. Comment text after `//` is ignored, and so is everything from
/// a `#[cfg(test)]` line to the end of the file.
#[must_use]
pub fn scan_production(needles: &[&str]) -> Vec<Violation> {
    let root = workspace_root();
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        let path = root.join(dir);
        if !path.exists() {
            continue;
        }
        for entry in walkdir::WalkDir::new(&path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
                scan_file(entry.path(), needles, &mut violations);
            }
        }
    }

    violations
}

fn scan_file(path: &Path, needles: &[&str], violations: &mut Vec<Violation>) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };

    for (idx, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("#[cfg(test)]") {
            break;
        }

        let code_part = line.split("//").next().unwrap_or(line);
        if needles.iter().any(|n| code_part.contains(n)) {
            violations.push(Violation {
                path: path.to_path_buf(),
                line_number: idx + 1,
                line: line.trim().to_string(),
            });
        }
    }
}

/// Panic with a readable report when `violations` is non-empty
pub fn assert_clean(rule: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\nCRITICAL: {rule}\n");
    for violation in violations {
        eprintln!("  {violation}");
    }

    panic!(
        "\nFound {} violation(s) of: {rule}\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_dirs_exist() {
        let root = workspace_root();
        for dir in PRODUCTION_DIRS {
            assert!(root.join(dir).is_dir(), "missing {dir}");
        }
    }

    #[test]
    fn scanner_skips_comments_and_test_modules() {
        let dir = std::env::temp_dir().join("scriptreel-arch-scan");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("sample.rs");
        fs::write(
            &file,
            "fn a() {}\n// tokio::time::sleep(x)\nfn b() { std::thread::sleep(d); }\n#[cfg(test)]\nmod tests { fn c() { tokio::time::sleep(d); } }\n",
        )
        .unwrap();

        let mut violations = Vec::new();
        scan_file(&file, &["::sleep("], &mut violations);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line_number, 3);
    }
}
