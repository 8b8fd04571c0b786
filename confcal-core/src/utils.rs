use std::path::PathBuf;

/// Convert a title to a filename-safe slug.
///
/// Lowercases, turns spaces into hyphens and drops everything that is not
/// alphanumeric, a space or a hyphen. Runs of hyphens collapse to one.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' {
                Some(c)
            } else if c.is_whitespace() {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Expand `~` and environment variables in a configured path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
