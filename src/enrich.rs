//! `@file` references in prompts and response formatting.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

/// Header placed before the inlined file contents.
pub const REFERENCED_FILES_HEADER: &str = "\n\n# Referenced Files:\n";

/// Prefix of every formatted response.
pub const RESPONSE_PREFIX: &str = "Poe response:";

/// Responses longer than this many characters are truncated.
pub const MAX_RESPONSE_CHARS: usize = 100_000;

const FILE_SEPARATOR: &str = "\n\n---\n\n";

fn file_reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@(\S+)").expect("valid file reference pattern"))
}

/// Every `@path` token in `prompt`, in order of appearance.
///
/// ```
/// use poe_bridge::enrich::parse_file_references;
///
/// let refs = parse_file_references("@src/main.rs explain this, see @Cargo.toml");
/// assert_eq!(refs, vec!["src/main.rs", "Cargo.toml"]);
/// ```
pub fn parse_file_references(prompt: &str) -> Vec<String> {
    file_reference_pattern()
        .captures_iter(prompt)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn resolve(path: &str) -> PathBuf {
    let clean = Path::new(path.strip_prefix('@').unwrap_or(path));
    if clean.is_absolute() {
        clean.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(clean))
            .unwrap_or_else(|_| clean.to_path_buf())
    }
}

/// Render the given files as Markdown sections.
///
/// Unreadable files produce an error section instead of failing the whole batch.
pub async fn read_referenced_files(paths: &[String]) -> String {
    let mut sections = Vec::with_capacity(paths.len());
    for path in paths {
        let resolved = resolve(path);
        match tokio::fs::read_to_string(&resolved).await {
            Ok(content) => {
                let name = resolved
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.clone());
                debug!(path = %resolved.display(), chars = content.len(), "read referenced file");
                sections.push(format!(
                    "## {name}\nPath: {}\n```\n{content}\n```",
                    resolved.display()
                ));
            }
            Err(err) => {
                let message = format!("Failed to read file '{path}': {err}");
                warn!("{message}");
                sections.push(format!("## {path}\n**Error**: {message}"));
            }
        }
    }
    sections.join(FILE_SEPARATOR)
}

/// Prefix the reply for display, truncating very large responses.
pub fn format_response(text: &str) -> String {
    match text.char_indices().nth(MAX_RESPONSE_CHARS) {
        Some((cut, _)) => format!(
            "{RESPONSE_PREFIX}\n[Large response truncated at 100k chars]\n{}...",
            &text[..cut]
        ),
        None => format!("{RESPONSE_PREFIX}\n{text}"),
    }
}
