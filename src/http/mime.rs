//! MIME type detection module
//!
//! Maps the extension of a request path to the Content-Type it is delivered
//! with. HTML is sent as `application/xhtml+xml` so that malformed markup
//! shows up in the browser straight away. A few non-standard extensions are
//! disabled on purpose and answer 415 like unknown ones.

use std::collections::HashMap;

/// Type served for `.html` files and rendered pages
pub const HTML: &str = "application/xhtml+xml";

/// Extension to content-type table; `None` marks a disabled extension
pub struct TypeTable {
    types: HashMap<&'static str, Option<&'static str>>,
}

impl TypeTable {
    pub fn new() -> Self {
        let types = HashMap::from([
            ("html", Some(HTML)),
            ("css", Some("text/css")),
            ("js", Some("application/javascript")),
            ("mjs", Some("application/javascript")),
            ("png", Some("image/png")),
            ("gif", Some("image/gif")),
            ("jpeg", Some("image/jpeg")),
            ("jpg", Some("image/jpeg")),
            ("svg", Some("image/svg+xml")),
            ("json", Some("application/json")),
            ("pdf", Some("application/pdf")),
            ("txt", Some("text/plain")),
            ("ttf", Some("application/x-font-ttf")),
            ("woff", Some("application/font-woff")),
            ("aac", Some("audio/aac")),
            ("mp3", Some("audio/mpeg")),
            ("mp4", Some("video/mp4")),
            ("webm", Some("video/webm")),
            ("ico", Some("image/x-icon")),
            // Non-standard: use .html
            ("xhtml", None),
            ("htm", None),
            // Platform dependent: use .zip / .pdf
            ("rar", None),
            ("doc", None),
            ("docx", None),
        ]);
        Self { types }
    }

    /// Content type for the extension of `path`, or `None` if unsupported
    ///
    /// The extension is everything after the last `.`; a path without a dot
    /// has none.
    ///
    /// # Examples
    /// ```
    /// use pokesite::http::mime::TypeTable;
    /// let table = TypeTable::new();
    /// assert_eq!(table.content_type("/index.html"), Some("application/xhtml+xml"));
    /// assert_eq!(table.content_type("/old.htm"), None);
    /// ```
    pub fn content_type(&self, path: &str) -> Option<&'static str> {
        let (_, extension) = path.rsplit_once('.')?;
        self.types.get(extension).copied().flatten()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
