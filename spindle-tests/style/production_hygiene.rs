//! Production Hygiene
//!
//! Production code propagates errors instead of panicking and carries no
//! silenced dead code. Everything from the first `#[cfg(test)]` line of a file
//! onward is treated as test code.

use std::fs;
use std::path::{Path, PathBuf};

/// A banned pattern found in production code
#[derive(Debug)]
struct HygieneViolation {
    file_path: String,
    line_number: usize,
    rule: &'static str,
    context: String,
}

/// Patterns rejected in production code, with the rule name reported for each
const BANNED_PATTERNS: [(&str, &str); 3] = [
    ("dead_code", "#[allow(dead_code)]"),
    ("unwrap", ".unwrap()"),
    ("expect", ".expect("),
];

struct HygieneChecker {
    violations: Vec<HygieneViolation>,
    files_checked: usize,
}

impl HygieneChecker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
            files_checked: 0,
        }
    }

    /// Collects `src/` trees of every `spindle-*` crate under `root`
    fn find_source_files(root: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            let is_crate = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with("spindle-"))
                .unwrap_or(false);
            let src = path.join("src");
            if is_crate && src.is_dir() {
                Self::find_rust_files_recursive(&src, &mut files, 0)?;
            }
        }
        Ok(files)
    }

    fn find_rust_files_recursive(
        dir: &Path,
        files: &mut Vec<PathBuf>,
        depth: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if depth > 8 {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                Self::find_rust_files_recursive(&path, files, depth + 1)?;
            } else if path.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(path);
            }
        }
        Ok(())
    }

    /// Check if a file path holds only test code
    fn is_test_file(path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        name == "tests.rs" || name.ends_with("_tests.rs")
    }

    fn check_source(&mut self, file_path: &str, content: &str) {
        self.files_checked += 1;

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.starts_with("#[cfg(test)]") {
                break;
            }
            if trimmed.starts_with("//") {
                continue;
            }

            for (rule, pattern) in BANNED_PATTERNS {
                if trimmed.contains(pattern) {
                    self.violations.push(HygieneViolation {
                        file_path: file_path.to_string(),
                        line_number: index + 1,
                        rule,
                        context: trimmed.to_string(),
                    });
                }
            }
        }
    }

    fn check_workspace(&mut self, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
        for path in Self::find_source_files(root)? {
            if Self::is_test_file(&path) {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            self.check_source(&path.to_string_lossy(), &content);
        }
        Ok(())
    }

    /// Report violations and return whether the check passed
    fn report_violations(&self) -> bool {
        if self.violations.is_empty() {
            println!(
                "Production hygiene: {} files checked, no violations found",
                self.files_checked
            );
            return true;
        }

        println!("Production hygiene violations found:");
        for violation in &self.violations {
            println!(
                "{}:{} [{}] {}",
                violation.file_path, violation.line_number, violation.rule, violation.context
            );
        }
        println!(
            "Found {} violation(s) in {} file(s) checked",
            self.violations.len(),
            self.files_checked
        );

        false
    }
}

#[test]
fn test_is_test_file() {
    assert!(HygieneChecker::is_test_file(Path::new("spindle-sim/src/tests.rs")));
    assert!(HygieneChecker::is_test_file(Path::new("src/engine_tests.rs")));
    assert!(!HygieneChecker::is_test_file(Path::new("spindle-core/src/engine.rs")));
}

#[test]
fn test_detection_stops_at_test_module() {
    let mut checker = HygieneChecker::new();
    let content = r#"
fn load() -> u32 {
    read().unwrap()
}

// a comment mentioning .unwrap() is fine

#[allow(dead_code)]
fn unused() {}

#[cfg(test)]
mod tests {
    fn helper() { value().unwrap(); }
}
"#;

    checker.check_source("sample.rs", content);

    let rules: Vec<_> = checker.violations.iter().map(|v| v.rule).collect();
    assert_eq!(rules, vec!["unwrap", "dead_code"]);
    assert_eq!(checker.violations[0].line_number, 3);
}

#[test]
fn production_hygiene() {
    let mut checker = HygieneChecker::new();
    checker
        .check_workspace(Path::new(".."))
        .expect("Failed to check workspace");

    assert!(checker.files_checked > 0, "No spindle sources found");
    assert!(
        checker.report_violations(),
        "Production code contains banned patterns; see output above"
    );
}
