//! URL resolution and link extraction utilities.
//!
//! [§ 4.2.3 The base element](https://html.spec.whatwg.org/multipage/semantics.html#the-base-element)
//! [URL Standard](https://url.spec.whatwg.org/)

/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Resolve a potentially relative URL against a base URL.
///
/// # Algorithm
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// NOTE: This is a simplified implementation. Full URL resolution requires
/// implementing the URL Standard's URL parsing algorithm.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    // STEP 1: Check if href is already absolute.
    //
    // [URL Standard § 4.3](https://url.spec.whatwg.org/#url-parsing)
    // "An absolute-URL string is a URL-scheme string, followed by U+003A (:),
    // followed by a scheme-specific part."
    if href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("data:")
        || href.starts_with("file:")
        || href.starts_with("javascript:")
        || href.starts_with("about:")
    {
        return href.to_string();
    }

    // STEP 2: Resolve relative URL against base.
    //
    // TODO(url-resolution): Handle . and .. path segments per the URL
    // Standard's path normalization.
    let Some(base) = base_url else {
        return href.to_string();
    };

    if href.starts_with("//") {
        // Protocol-relative URL - prepend scheme from base
        if base.starts_with("https:") {
            format!("https:{href}")
        } else {
            format!("http:{href}")
        }
    } else if href.starts_with('/') {
        // Absolute path - join with the origin of the base URL
        base.find("://").map_or_else(
            || href.to_string(),
            |scheme_end| {
                let after_scheme = &base[scheme_end + 3..];
                after_scheme.find('/').map_or_else(
                    // No path in base, just append
                    || format!("{base}{href}"),
                    |path_start| {
                        let origin = &base[..scheme_end + 3 + path_start];
                        format!("{origin}{href}")
                    },
                )
            },
        )
    } else if href.is_empty() {
        // Empty href resolves to the base itself
        base.to_string()
    } else {
        // Relative path - join with base directory
        let base_dir = base.rsplit_once('/').map_or(base, |(dir, _)| dir);
        format!("{base_dir}/{href}")
    }
}

/// Extract a URL from a link attribute value, handling junk like embedded
/// whitespace and attempting to read a real URL out of `javascript:` links,
/// then resolve it against `base`.
///
/// Leading and trailing whitespace is trimmed, control characters are
/// dropped, and interior spaces are percent-encoded as `%20`. For
/// `javascript:` pseudo-URLs the first single- or double-quoted literal is
/// taken as a best-effort target.
///
/// Returns `None` when nothing usable remains; a missing link is a
/// degradation, never an error.
#[must_use]
pub fn extract_link(rel: &str, base: Option<&str>) -> Option<String> {
    // Copy, removing white space and control characters.
    let trimmed = rel.trim();
    let mut cleaned = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if ch < ' ' {
            // skip control characters
        } else if ch == ' ' {
            cleaned.push_str("%20");
        } else {
            cleaned.push(ch);
        }
    }

    if cleaned.is_empty() {
        return None;
    }

    // Extract the first quoted string out of a "javascript:" link.
    let target = if cleaned.starts_with("javascript:") {
        first_quoted_literal(&cleaned).unwrap_or(cleaned.as_str())
    } else {
        cleaned.as_str()
    };

    if target.starts_with("javascript:") {
        // No quoted literal to pull out; not a fetchable link.
        return None;
    }

    Some(resolve_url(target, base))
}

/// Find the first single- or double-quoted literal in `s`, preferring
/// whichever quote style opens first when both are present and closed.
fn first_quoted_literal(s: &str) -> Option<&str> {
    let apos = quoted_span(s, '\'');
    let quot = quoted_span(s, '"');

    match (apos, quot) {
        (Some(a), Some(q)) => {
            if a.0 < q.0 {
                Some(&s[a.0 + 1..a.1])
            } else {
                Some(&s[q.0 + 1..q.1])
            }
        }
        (Some(a), None) => Some(&s[a.0 + 1..a.1]),
        (None, Some(q)) => Some(&s[q.0 + 1..q.1]),
        (None, None) => None,
    }
}

/// Byte offsets of the opening and closing occurrence of `quote` in `s`,
/// if both exist.
fn quoted_span(s: &str, quote: char) -> Option<(usize, usize)> {
    let open = s.find(quote)?;
    let close = s[open + quote.len_utf8()..].find(quote)?;
    Some((open, open + quote.len_utf8() + close))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_unchanged() {
        assert_eq!(
            resolve_url("https://example.com/a", Some("https://other.com/")),
            "https://example.com/a"
        );
    }

    #[test]
    fn relative_path_joined_with_base_directory() {
        assert_eq!(
            resolve_url("img/logo.png", Some("https://example.com/docs/page.html")),
            "https://example.com/docs/img/logo.png"
        );
    }

    #[test]
    fn absolute_path_joined_with_origin() {
        assert_eq!(
            resolve_url("/top.html", Some("https://example.com/docs/page.html")),
            "https://example.com/top.html"
        );
    }

    #[test]
    fn extract_link_strips_whitespace_and_controls() {
        let got = extract_link("  pa ge\x01.html ", Some("https://example.com/dir/index.html"));
        assert_eq!(got.as_deref(), Some("https://example.com/dir/pa%20ge.html"));
    }

    #[test]
    fn extract_link_pulls_quoted_target_from_javascript() {
        let got = extract_link(
            "javascript:window.open('next.html')",
            Some("https://example.com/dir/index.html"),
        );
        assert_eq!(got.as_deref(), Some("https://example.com/dir/next.html"));
    }

    #[test]
    fn extract_link_prefers_earlier_quote_style() {
        let got = extract_link(
            "javascript:go(\"a.html\", 'b.html')",
            Some("https://example.com/"),
        );
        assert_eq!(got.as_deref(), Some("https://example.com/a.html"));
    }

    #[test]
    fn extract_link_rejects_unquoted_javascript() {
        assert_eq!(extract_link("javascript:void(0)", Some("https://example.com/")), None);
    }

    #[test]
    fn extract_link_empty_is_none() {
        assert_eq!(extract_link("   ", Some("https://example.com/")), None);
    }
}
