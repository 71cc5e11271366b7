use regex::Regex;
use std::fmt;

/// An absolute URL identified as referencing a target document
///
/// Immutable once extracted; consumed by the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteLink(String);

impl RemoteLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RemoteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scans raw page text for document URLs
///
/// Matches `http(s)://...<extension>` tokens terminated by whitespace or a
/// quote, which catches links in ordinary markup as well as URLs embedded
/// in script or attribute text. Works on the raw text, so no HTML parsing
/// is involved and malformed markup cannot break extraction.
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    /// Compiles the extraction pattern for a target extension
    ///
    /// # Arguments
    ///
    /// * `extension` - Filename suffix that marks a document link,
    ///   including the leading dot
    pub fn new(extension: &str) -> Result<Self, regex::Error> {
        // A URL token only counts when terminated by whitespace, a quote,
        // or the end of input; the terminator stays out of the capture.
        let pattern = Regex::new(&format!(
            r#"(https?://[^\s"']+{})(?:[\s"']|$)"#,
            regex::escape(extension)
        ))?;
        Ok(Self { pattern })
    }

    /// Yields every document URL in the page, in order of appearance
    ///
    /// The iterator is lazy and restartable; duplicates are not removed
    /// here, they resolve later by canonical-name collision. Empty input
    /// yields nothing, and partial or malformed URLs are simply unmatched.
    pub fn links<'a>(&'a self, page_text: &'a str) -> impl Iterator<Item = RemoteLink> + 'a {
        self.pattern
            .captures_iter(page_text)
            .map(|c| RemoteLink(c[1].to_string()))
    }
}
