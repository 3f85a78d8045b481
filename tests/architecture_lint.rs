//! Architecture enforcement tests.
//!
//! Command handlers must not change container state themselves. Every
//! template mutation flows through the management view, which stages the
//! change and submits it to the executor. These tests ensure violations
//! are caught in CI.
//!
//! # Test Categories
//!
//! 1. **Direct Submission Detection** - Handlers must not call `submit()`
//! 2. **Field Mutation Detection** - Handlers must not assign container fields
//! 3. **Layering** - The resolver stays free of engine and UI dependencies
//! 4. **Panic Freedom** - Library code propagates errors instead of unwrapping

use std::fs;
use std::path::{Path, PathBuf};

/// Handlers allowed to submit commands without a management view.
///
/// - `template.rs` - Template creation has no counterpart in the view
const DIRECT_SUBMIT_ALLOWED: &[&str] = &["template.rs"];

/// Files whose non-test code may unwrap.
///
/// - `mock.rs` - Test double; a poisoned mutex is a test failure
const UNWRAP_ALLOWED: &[&str] = &["mock.rs"];

/// Container fields only the resolver and the store may assign.
const GUARDED_FIELDS: &[&str] = &[".default_template =", ".inherit_templates =", ".templates ="];

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    files
}

fn file_name(path: &Path) -> &str {
    path.file_name().unwrap().to_str().unwrap()
}

/// Source up to the first test module, without comment lines.
fn production_code(path: &Path) -> String {
    let content =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    content
        .lines()
        .take_while(|line| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Direct Submission Detection
// =============================================================================

#[test]
fn handlers_do_not_submit_directly() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/cli/commands")) {
        let name = file_name(&path);
        if DIRECT_SUBMIT_ALLOWED.contains(&name) {
            continue;
        }
        if production_code(&path).contains(".submit(") {
            violations.push(format!(
                "{}: submits a command directly - use the management view",
                name
            ));
        }
    }

    assert!(
        violations.is_empty(),
        "Direct submissions found:\n{}",
        violations.join("\n")
    );
}

// =============================================================================
// Field Mutation Detection
// =============================================================================

#[test]
fn handlers_do_not_assign_container_fields() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/cli/commands")) {
        let code = production_code(&path);
        for field in GUARDED_FIELDS {
            if code.contains(field) {
                violations.push(format!("{}: assigns `{}`", file_name(&path), field.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Container field assignments found:\n{}",
        violations.join("\n")
    );
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn resolver_is_pure() {
    let code = production_code(Path::new("src/resolver.rs"));
    for forbidden in ["crate::engine", "crate::ui", "crate::manage", "std::fs"] {
        assert!(
            !code.contains(forbidden),
            "resolver.rs must not depend on {}",
            forbidden
        );
    }
}

#[test]
fn core_does_not_depend_on_outer_layers() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src/core")) {
        let code = production_code(&path);
        for outer in ["crate::cli", "crate::manage", "crate::ui"] {
            if code.contains(outer) {
                violations.push(format!("{}: uses {}", path.display(), outer));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Layering violations found:\n{}",
        violations.join("\n")
    );
}

// =============================================================================
// Panic Freedom
// =============================================================================

#[test]
fn library_code_does_not_unwrap() {
    let mut violations = Vec::new();

    for path in rust_files(Path::new("src")) {
        if UNWRAP_ALLOWED.contains(&file_name(&path)) {
            continue;
        }
        for (i, line) in production_code(&path).lines().enumerate() {
            if line.contains(".unwrap()") || line.contains(".expect(") {
                violations.push(format!("{}:{}: {}", path.display(), i + 1, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Unwraps in library code:\n{}",
        violations.join("\n")
    );
}
