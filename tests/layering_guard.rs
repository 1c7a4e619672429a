//! Layering guardrails for the workspace crates.
//!
//! `tacfront_core` is pure vocabulary and must stay dependency-free. `tacfront_syntax` is a library
//! that other tools can embed, so binary-only concerns (argument parsing, log subscribers) belong to
//! the root crate. These tests scan the member manifests and fail if such a dependency shows up.

/// Dependency names listed in the `[dependencies]` table of `manifest`.
fn main_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut deps = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            deps.push(name.trim().to_string());
        }
    }
    deps
}

#[test]
fn core_crate_has_no_dependencies() {
    let deps = main_dependencies(include_str!("../crates/tacfront_core/Cargo.toml"));
    assert!(deps.is_empty(), "tacfront_core must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_crate_has_no_binary_dependencies() {
    let deps = main_dependencies(include_str!("../crates/tacfront_syntax/Cargo.toml"));
    for forbidden in ["clap", "tracing-subscriber"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in tacfront_syntax [dependencies]"
        );
    }
    assert!(deps.iter().any(|d| d == "tacfront_core"));
}

#[test]
fn root_crate_builds_on_the_members() {
    let deps = main_dependencies(include_str!("../Cargo.toml"));
    assert!(deps.iter().any(|d| d == "tacfront_core"));
    assert!(deps.iter().any(|d| d == "tacfront_syntax"));
}
