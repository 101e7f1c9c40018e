//! Response body processing
//!
//! Decompression, charset decoding and content decoding. None of these fail
//! outward: anything that cannot be decoded is kept as text.

use encoding_rs::{Encoding, UTF_8};
use flate2::read::{GzDecoder, ZlibDecoder, DeflateDecoder};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::io::Read;
use tracing::warn;

use crate::analysis::BodyFormat;
use crate::binary::is_binary;
use crate::client::RawResponse;
use crate::json::load_json_preserve_order;
use crate::mime::charset_of;
use crate::xml::{pretty_print, DEFAULT_INDENT};

/// Decoded response content, exactly one representation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Json(JsonValue),
    /// Pretty-printed XML
    Xml(String),
    Raw(String),
}

impl Content {
    pub fn format(&self) -> BodyFormat {
        match self {
            Content::Json(_) => BodyFormat::Json,
            Content::Xml(_) => BodyFormat::Xml,
            Content::Raw(_) => BodyFormat::Raw,
        }
    }
}

/// Decode body text according to the declared content type
///
/// JSON and XML that fail to parse come back as [`Content::Raw`].
pub fn decode_content(content_type: &str, text: &str) -> Content {
    let content_type = content_type.to_lowercase();

    if content_type.contains("application/json") {
        match load_json_preserve_order(text) {
            Ok(value) => Content::Json(value),
            Err(e) => {
                warn!(error = %e, "Response declared JSON but did not parse, keeping raw text");
                Content::Raw(text.to_string())
            }
        }
    } else if content_type.contains("application/xml") || content_type.contains("text/xml") {
        match pretty_print(text, DEFAULT_INDENT) {
            Ok(pretty) => Content::Xml(pretty),
            Err(e) => {
                warn!(error = %e, "Response declared XML but did not parse, keeping raw text");
                Content::Raw(text.to_string())
            }
        }
    } else {
        Content::Raw(text.to_string())
    }
}

/// Body after decompression and charset decoding
#[derive(Debug, Clone)]
pub struct ProcessedBody {
    pub text: String,
    /// Decompressed size
    pub size_bytes: u64,
    /// Name of the charset used to decode the text
    pub encoding: String,
    pub binary: bool,
    pub content: Content,
}

/// Decompress, decode and interpret the body of a response
pub fn process_body(raw: &RawResponse) -> ProcessedBody {
    let content_type = raw.header("content-type").unwrap_or("");
    let bytes = decompress(raw.header("content-encoding"), &raw.body);
    let binary = !bytes.is_empty() && is_binary(&bytes);

    let (text, encoding) = if binary {
        (String::from_utf8_lossy(&bytes).into_owned(), "binary".to_string())
    } else {
        decode_text(&bytes, charset_of(content_type).as_deref())
    };
    let content = if binary {
        Content::Raw(text.clone())
    } else {
        decode_content(content_type, &text)
    };

    ProcessedBody {
        size_bytes: bytes.len() as u64,
        text,
        encoding,
        binary,
        content,
    }
}

/// Decode bytes with the given charset label, UTF-8 when absent or unknown
pub fn decode_text(bytes: &[u8], charset: Option<&str>) -> (String, String) {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "Body contained malformed sequences");
    }
    (text.into_owned(), used.name().to_string())
}

/// Undo `content-encoding`, outermost coding last in the header
///
/// Unsupported codings (such as `br`) and corrupt streams leave the bytes as
/// received.
pub fn decompress(content_encoding: Option<&str>, body: &[u8]) -> Vec<u8> {
    let Some(header) = content_encoding else {
        return body.to_vec();
    };

    let mut data = body.to_vec();
    for coding in header.split(',').map(|c| c.trim().to_lowercase()).rev() {
        let decoded = match coding.as_str() {
            "identity" | "" => continue,
            "gzip" | "x-gzip" => read_all(GzDecoder::new(data.as_slice())),
            // Servers send both zlib-wrapped and raw deflate
            "deflate" => read_all(ZlibDecoder::new(data.as_slice()))
                .or_else(|_| read_all(DeflateDecoder::new(data.as_slice()))),
            other => {
                warn!(coding = other, "Unsupported content-encoding, body left as received");
                return data;
            }
        };
        match decoded {
            Ok(out) => data = out,
            Err(e) => {
                warn!(coding = %coding, error = %e, "Failed to decompress body");
                return body.to_vec();
            }
        }
    }
    data
}

fn read_all(mut reader: impl Read) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}
