use std::fmt;
use url::Url;

/// A canonical, filesystem-safe local filename derived from a remote URL
///
/// Canonical names contain only lowercase alphanumerics, underscore, dot,
/// and dash, and carry exactly one target-extension suffix. Two URLs that
/// canonicalize to the same name refer to the same stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty name means the URL carried no usable path segment; callers
    /// must treat it as a failure before writing anything to disk.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the canonical local filename for a remote document URL
///
/// Total function: any input produces some name, possibly empty. The step
/// order is a compatibility contract: collapsing extension runs before
/// decoding avoids spurious dot accumulation from encoded dots, and
/// decoding before the character strip ensures percent-encoded unsafe
/// characters are removed rather than left encoded.
///
/// 1. Extract the URL path, discarding query and fragment
/// 2. Take the final path segment
/// 3. Collapse repeated target-extension suffixes into one
/// 4. Percent-decode
/// 5. Strip characters outside alphanumeric / whitespace / `_` / `.` / `-`
/// 6. Replace whitespace runs with a single underscore
/// 7. Lowercase
///
/// # Arguments
///
/// * `link` - The absolute URL of the document
/// * `extension` - The target extension, lowercase, with leading dot
///
/// # Examples
///
/// ```
/// use docshelf::name::canonical_name;
///
/// let name = canonical_name("https://x.test/Files/Doc%20A.PDF.pdf", ".pdf");
/// assert_eq!(name.as_str(), "doc_a.pdf");
/// ```
pub fn canonical_name(link: &str, extension: &str) -> CanonicalName {
    let segment = final_path_segment(link);
    let collapsed = collapse_extension_runs(&segment, extension);
    let decoded = percent_decode(&collapsed);
    let scrubbed = scrub_unsafe_chars(&decoded);
    let underscored = collapse_whitespace(&scrubbed);
    CanonicalName(underscored.to_lowercase())
}

/// Extracts the final path segment of a URL, without query or fragment
///
/// Falls back to plain string handling when the URL does not parse, so the
/// caller never sees an error from here.
fn final_path_segment(link: &str) -> String {
    // Url::path() keeps percent-encoding intact, which is what the
    // collapse-then-decode ordering needs.
    let path = match Url::parse(link) {
        Ok(url) => url.path().to_string(),
        Err(_) => strip_query_and_fragment(link).to_string(),
    };

    path.rsplit('/').next().unwrap_or("").to_string()
}

fn strip_query_and_fragment(link: &str) -> &str {
    let end = link.find(['?', '#']).unwrap_or(link.len());
    &link[..end]
}

/// Collapses a run of repeated extension suffixes into exactly one
///
/// The comparison ignores ASCII case so `report.PDF.pdf` collapses the same
/// way `report.pdf.pdf` does; the surviving suffix is lowercased later by
/// the final canonicalization step.
fn collapse_extension_runs(segment: &str, extension: &str) -> String {
    let mut name = segment.to_string();
    let ext_len = extension.len();

    loop {
        let n = name.len();
        if n < 2 * ext_len {
            break;
        }
        let last = &name.as_bytes()[n - ext_len..];
        let prev = &name.as_bytes()[n - 2 * ext_len..n - ext_len];
        if last.eq_ignore_ascii_case(extension.as_bytes())
            && prev.eq_ignore_ascii_case(extension.as_bytes())
        {
            // Both suffixes matched an ASCII extension, so the truncation
            // point is a character boundary.
            name.truncate(n - ext_len);
        } else {
            break;
        }
    }

    name
}

/// Decodes percent-encoded bytes, leaving malformed escapes as-is
fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();

    while let Some(b) = bytes.next() {
        if b == b'%' {
            let h = bytes.next();
            let l = bytes.next();
            match (h.and_then(hex_digit), l.and_then(hex_digit)) {
                (Some(high), Some(low)) => out.push(high << 4 | low),
                _ => {
                    out.push(b'%');
                    out.extend(h);
                    out.extend(l);
                }
            }
        } else {
            out.push(b);
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Drops every character that is not alphanumeric, whitespace, underscore,
/// dot, or dash
///
/// Underscore survives because it is also the whitespace replacement
/// character: `doc_a.pdf` and `doc%20a.pdf` must land on the same name.
fn scrub_unsafe_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '.' | '-'))
        .collect()
}

/// Replaces each run of whitespace or underscores with a single underscore
fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_gap = false;

    for c in input.chars() {
        if c.is_whitespace() || c == '_' {
            if !in_gap {
                out.push('_');
            }
            in_gap = true;
        } else {
            out.push(c);
            in_gap = false;
        }
    }

    out
}
