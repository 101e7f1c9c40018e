//! MIME type utilities
//!
//! Functions for parsing Content-Type headers.

use mime::Mime;
use std::collections::HashMap;

/// Parse Content-Type header into MIME type and parameters
///
/// The MIME essence is lowercased; parameter names are lowercased as well.
/// Unparseable values come back trimmed and lowercased with no parameters.
///
/// # Examples
/// ```
/// use curlscope::mime::parse_content_type_header;
/// let (mime, params) = parse_content_type_header("application/json; charset=utf-8");
/// assert_eq!(mime, "application/json");
/// assert_eq!(params.get("charset"), Some(&"utf-8".to_string()));
/// ```
pub fn parse_content_type_header(header: &str) -> (String, HashMap<String, String>) {
    match header.trim().parse::<Mime>() {
        Ok(m) => {
            let mime_type = m.essence_str().to_lowercase();
            let params: HashMap<_, _> = m.params()
                .map(|(k, v)| (k.as_str().to_lowercase(), v.to_string()))
                .collect();
            (mime_type, params)
        }
        Err(_) => {
            let essence = header.split(';').next().unwrap_or("").trim().to_lowercase();
            (essence, HashMap::new())
        }
    }
}

/// Charset parameter of a Content-Type header, if any
pub fn charset_of(header: &str) -> Option<String> {
    parse_content_type_header(header).1.remove("charset")
}
