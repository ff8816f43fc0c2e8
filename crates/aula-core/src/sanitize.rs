//! Untrusted filename normalization.
//!
//! Uploaded filenames are attacker-controlled and are never used as storage
//! path components; the sanitized form is only a display name and the source
//! of the preserved extension.

const MAX_FILENAME_LENGTH: usize = 255;

/// Normalize an untrusted filename to a safe charset.
///
/// The base name (everything before the last dot) has spaces replaced with
/// underscores and every character outside `[A-Za-z0-9_-.]` stripped; the
/// extension is carried over verbatim. The result is truncated so that
/// base + extension never exceed 255 bytes. Empty or whitespace-only input
/// yields an empty string, which callers must treat as invalid input.
pub fn sanitize_filename(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // Only the final path component matters; this also disarms traversal
    // attempts like "../../etc/passwd".
    let leaf = trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
        .trim();

    let (base, extension) = match leaf.rfind('.') {
        Some(idx) if idx > 0 => leaf.split_at(idx),
        _ => (leaf, ""),
    };

    let mut cleaned: String = base
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();

    let max_base = MAX_FILENAME_LENGTH.saturating_sub(extension.len());
    cleaned.truncate(max_base);

    if cleaned.is_empty() {
        return String::new();
    }

    format!("{}{}", cleaned, extension)
}

/// The extension of a sanitized filename, dot included (e.g. ".docx"), or ""
/// when there is none.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_spaces_with_underscores() {
        assert_eq!(sanitize_filename("my document.pdf"), "my_document.pdf");
    }

    #[test]
    fn strips_characters_outside_allowed_set() {
        assert_eq!(
            sanitize_filename("report (final).docx"),
            "report_final.docx"
        );
        assert_eq!(sanitize_filename("schedule<v2>!.xlsx"), "schedulev2.xlsx");
    }

    #[test]
    fn empty_and_whitespace_yield_empty() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("   "), "");
        assert_eq!(sanitize_filename("\t\n"), "");
    }

    #[test]
    fn drops_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\notes.txt"), "notes.txt");
    }

    #[test]
    fn output_never_exceeds_255_including_extension() {
        let long_base = "a".repeat(400);
        let name = format!("{}.docx", long_base);
        let sanitized = sanitize_filename(&name);
        assert_eq!(sanitized.len(), 255);
        assert!(sanitized.ends_with(".docx"));
    }

    #[test]
    fn base_only_name_keeps_no_extension() {
        assert_eq!(sanitize_filename("README"), "README");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn all_invalid_base_yields_empty() {
        assert_eq!(sanitize_filename("???.pdf"), "");
    }

    #[test]
    fn extension_is_preserved_verbatim() {
        assert_eq!(sanitize_filename("notes.TXT"), "notes.TXT");
        assert_eq!(extension_of("notes.TXT"), ".TXT");
    }

    #[test]
    fn leading_dot_names_are_treated_as_base() {
        assert_eq!(sanitize_filename(".gitignore"), ".gitignore");
    }
}
