//! Query string tokenizer and value parsers.
//!
//! Minimal percent-decoding and key-value extraction without external dependencies.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use crate::constraint::{Mode, RequestParams, Scale};

/// Fields as seen in the query, before defaults are applied.
#[derive(Default)]
struct Raw {
    width: Option<u32>,
    height: Option<u32>,
    mode: Option<Mode>,
    scale: Option<Scale>,
    mode_invalid: bool,
    scale_invalid: bool,
}

/// Parse a RIAPI query string into request parameters + warnings.
pub(crate) fn parse_query(query: &str) -> (RequestParams, Vec<ParseWarning>) {
    let mut raw = Raw::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);
        let key_lower = key.to_ascii_lowercase();

        dispatch_key(&key_lower, &value, &mut raw, &mut warnings);
    }

    // An invalid value wins over the default, so the planner can report it.
    let params = RequestParams {
        width: raw.width,
        height: raw.height,
        mode: match raw.mode {
            None if raw.mode_invalid => None,
            m => Some(m.unwrap_or_default()),
        },
        scale: match raw.scale {
            None if raw.scale_invalid => None,
            s => Some(s.unwrap_or_default()),
        },
    };
    (params, warnings)
}

fn dispatch_key(key: &str, value: &str, raw: &mut Raw, warnings: &mut Vec<ParseWarning>) {
    match key {
        "w" | "width" => dimension(&mut raw.width, "w", key, value, warnings),
        "h" | "height" => dimension(&mut raw.height, "h", key, value, warnings),
        "mode" => match parse_mode(value) {
            Some(m) => {
                set_or_warn(&mut raw.mode, m, key, value, warnings);
                raw.mode_invalid = false;
            }
            None => {
                raw.mode = None;
                raw.mode_invalid = true;
                warnings.push(ParseWarning::ValueInvalid {
                    key: "mode",
                    value: String::from(value),
                    reason: "expected max|pad|crop|stretch",
                });
            }
        },
        "scale" => match parse_scale(value) {
            Some(s) => {
                set_or_warn(&mut raw.scale, s, key, value, warnings);
                raw.scale_invalid = false;
            }
            None => {
                raw.scale = None;
                raw.scale_invalid = true;
                warnings.push(ParseWarning::ValueInvalid {
                    key: "scale",
                    value: String::from(value),
                    reason: "expected down|both|canvas",
                });
            }
        },
        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

fn dimension(
    field: &mut Option<u32>,
    name: &'static str,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    match parse_dimension(value) {
        Some(v) => set_or_warn(field, v, key, value, warnings),
        None => warnings.push(ParseWarning::ValueInvalid {
            key: name,
            value: String::from(value),
            reason: "expected a positive integer",
        }),
    }
}

/// Set a field, warning on duplicate.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: T,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if field.is_some() {
        warnings.push(ParseWarning::DuplicateKey {
            key: String::from(key),
            value: String::from(value),
        });
    }
    *field = Some(parsed);
}

// ---- Value parsers ----

fn parse_dimension(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|&v| v > 0)
}

fn parse_mode(s: &str) -> Option<Mode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "max" => Some(Mode::Max),
        "pad" => Some(Mode::Pad),
        "crop" => Some(Mode::Crop),
        "stretch" => Some(Mode::Stretch),
        _ => None,
    }
}

fn parse_scale(s: &str) -> Option<Scale> {
    match s.trim().to_ascii_lowercase().as_str() {
        "down" | "downscaleonly" => Some(Scale::Down),
        "both" => Some(Scale::Both),
        "canvas" | "upscalecanvas" => Some(Scale::Canvas),
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&' or ';'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split(['&', ';']).filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let input = s.as_bytes();
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < input.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(input[i + 1]), hex_digit(input[i + 2])) {
                    bytes.push(hi << 4 | lo);
                    i += 3;
                } else {
                    bytes.push(b'%');
                    i += 1;
                }
            }
            b => {
                bytes.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
