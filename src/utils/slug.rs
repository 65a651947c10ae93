use std::sync::OnceLock;

use regex::Regex;

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("static slug pattern"))
}

/// Turn arbitrary input (a title, user input, or a pasted URL) into a slug
/// safe for use as a URL path segment.
///
/// URL-ish input is first reduced to its last non-empty path segment, then
/// the string is lowercased, stripped of everything outside `[\w\s-]`, and
/// runs of whitespace/underscores/hyphens collapse to a single hyphen.
///
/// The result matches `^[a-z0-9-]+$` or is empty. An empty result means
/// the input could not be salvaged: callers must reject it or fall back to
/// a slug generated from the title. The function is idempotent.
pub fn sanitize_slug(input: &str) -> String {
    let mut s = input.trim().to_string();

    if s.contains("://") || s.contains("localhost") || s.starts_with("http") {
        if let Some(segment) = s.split('/').filter(|seg| !seg.is_empty()).last() {
            s = segment.to_string();
        }
    }

    for scheme in ["https://", "http://"] {
        if let Some(rest) = s.strip_prefix(scheme) {
            s = rest.to_string();
        }
    }
    if let Some(rest) = s.strip_prefix("www.") {
        s = rest.to_string();
    }

    let lowered = s.to_lowercase();
    let trimmed = lowered.trim();

    // Keep [\w\s-], then collapse separator runs into single hyphens.
    // Separators are buffered so leading and trailing runs never emit.
    let mut out = String::with_capacity(trimmed.len());
    let mut pending_separator = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = !out.is_empty();
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator {
                out.push('-');
                pending_separator = false;
            }
            out.push(ch);
        }
    }

    out
}

/// The postcondition of [`sanitize_slug`], used wherever a stored slug is
/// re-checked before rendering or persisting.
pub fn is_valid_slug(slug: &str) -> bool {
    slug_re().is_match(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_reduces_to_last_segment() {
        assert_eq!(
            sanitize_slug("https://example.com/Luxury Villa!"),
            "luxury-villa"
        );
        assert_eq!(
            sanitize_slug("http://localhost:3000/properties/sea-view-penthouse"),
            "sea-view-penthouse"
        );
        assert_eq!(sanitize_slug("https://example.com/listings/villa/"), "villa");
    }

    #[test]
    fn test_bare_domain_strips_scheme_and_www() {
        // No path: the "last segment" is the host itself
        assert_eq!(sanitize_slug("https://www.example.com"), "examplecom");
        assert_eq!(sanitize_slug("www.marbella-estates.com"), "marbella-estatescom");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(sanitize_slug("  Multiple   --- Hyphens  "), "multiple-hyphens");
        assert_eq!(sanitize_slug("beach_front__villa"), "beach-front-villa");
        assert_eq!(sanitize_slug("--edge--case--"), "edge-case");
    }

    #[test]
    fn test_punctuation_and_accents_removed() {
        assert_eq!(sanitize_slug("Château d'Azur — Nice"), "chteau-dazur-nice");
        assert_eq!(sanitize_slug("Penthouse (5 Bed), Mayfair"), "penthouse-5-bed-mayfair");
    }

    #[test]
    fn test_empty_and_unsalvageable_input() {
        assert_eq!(sanitize_slug(""), "");
        assert_eq!(sanitize_slug("   "), "");
        assert_eq!(sanitize_slug("!!!***"), "");
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "https://example.com/Luxury Villa!",
            "  Multiple   --- Hyphens  ",
            "Château d'Azur — Nice",
            "already-a-valid-slug",
            "UPPER case Title 42",
            "",
        ];
        for s in samples {
            let once = sanitize_slug(s);
            assert_eq!(sanitize_slug(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_postcondition() {
        let samples = ["Luxury Villa!", "https://x.io/a b c", "_under_", "42"];
        for s in samples {
            let out = sanitize_slug(s);
            assert!(
                out.is_empty() || is_valid_slug(&out),
                "postcondition violated for {:?} -> {:?}",
                s,
                out
            );
        }
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("sea-view-penthouse"));
        assert!(is_valid_slug("42"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Sea-View"));
        assert!(!is_valid_slug("has space"));
        assert!(!is_valid_slug("under_score"));
    }
}
