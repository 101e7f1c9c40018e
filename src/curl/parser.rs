//! Token walker that builds a [`ParsedRequest`]

use url::Url;

use super::tokenizer::tokenize;
use crate::errors::ParseError;
use crate::http::Method;
use crate::models::{HeadersDict, ParsedRequest};

/// Parse a curl command string into a [`ParsedRequest`]
///
/// The URL is the last token that does not start with `-` and is not consumed
/// as a flag value. A body promotes the method to POST only while it is still
/// the default GET; an explicit `-X` always wins, whatever the flag order.
pub fn parse_curl_command(cmd: &str) -> Result<ParsedRequest, ParseError> {
    let tokens = tokenize(cmd)?;

    match tokens.first() {
        None => return Err(ParseError::Empty),
        Some(first) if !first.eq_ignore_ascii_case("curl") => return Err(ParseError::NotCurl),
        Some(_) => {}
    }

    let mut method = Method::default();
    let mut explicit_method = false;
    let mut url: Option<String> = None;
    let mut headers = HeadersDict::new();
    let mut body: Option<String> = None;
    let mut i = 1;

    while i < tokens.len() {
        let token = tokens[i].as_str();

        if !token.starts_with('-') {
            url = Some(token.to_string());
            i += 1;
            continue;
        }

        match token {
            "-H" | "--header" => {
                let value = flag_value(&tokens, i)?;
                let (name, value) = parse_header(value)?;
                // Later duplicates overwrite earlier ones but keep their position
                headers.insert(name, value);
                i += 2;
            }
            "-X" | "--request" => {
                method = Method::parse(flag_value(&tokens, i)?);
                explicit_method = true;
                i += 2;
            }
            "-d" | "--data" | "--data-raw" => {
                body = Some(flag_value(&tokens, i)?.to_string());
                if !explicit_method && method == Method::Get {
                    method = Method::Post;
                }
                i += 2;
            }
            _ => {
                // Unrecognized flags carry no state and never consume a value
                tracing::trace!(flag = token, "Skipping unsupported curl flag");
                i += 1;
            }
        }
    }

    let url = url.ok_or(ParseError::MissingUrl)?;
    validate_url(&url)?;

    Ok(ParsedRequest::new(method, url, headers, body))
}

/// Value of the flag at `index`, or an error naming the flag
fn flag_value<'a>(tokens: &'a [String], index: usize) -> Result<&'a str, ParseError> {
    tokens
        .get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingValue(tokens[index].clone()))
}

/// Parse a header string "Name: Value", splitting on the first colon
fn parse_header(header: &str) -> Result<(String, String), ParseError> {
    let (name, value) = header
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidHeader(header.to_string()))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

/// The URL must parse and carry both a scheme and a host
fn validate_url(raw: &str) -> Result<(), ParseError> {
    let parsed = Url::parse(raw).map_err(|e| ParseError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() && !parsed.scheme().is_empty() => Ok(()),
        _ => Err(ParseError::InvalidUrl(format!("{}: missing scheme or host", raw))),
    }
}
