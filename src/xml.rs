//! XML well-formedness checks and pretty printing

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

/// Default indentation used when pretty printing
pub const DEFAULT_INDENT: usize = 2;

/// Check that `text` is a well-formed XML document with a single root element
pub fn check_well_formed(text: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(text);
    let mut depth: usize = 0;
    let mut roots: usize = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    roots += 1;
                }
            }
            Ok(Event::Text(t)) => {
                if depth == 0 && !t.iter().all(u8::is_ascii_whitespace) {
                    return Err("text outside of the root element".to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            Ok(_) => {}
        }
    }

    match (roots, depth) {
        (1, 0) => Ok(()),
        (0, _) => Err("no root element".to_string()),
        (_, 0) => Err("more than one root element".to_string()),
        _ => Err("unclosed element".to_string()),
    }
}

/// Whether `text` parses as an XML document
pub fn is_xml(text: &str) -> bool {
    check_well_formed(text).is_ok()
}

/// Re-indent a well-formed XML document
///
/// Whitespace-only text between elements is dropped and every element starts
/// on its own line. Malformed input is rejected rather than partially printed.
pub fn pretty_print(text: &str, indent: usize) -> Result<String, String> {
    check_well_formed(text)?;

    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event).map_err(|e| e.to_string())?,
            Err(e) => return Err(e.to_string()),
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}
