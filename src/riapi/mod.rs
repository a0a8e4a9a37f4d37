//! RIAPI level-1 query string parsing.
//!
//! Parses query strings like `?w=800&h=600&mode=crop` (or the
//! `;`-separated `w=800;h=600;mode=crop`) into [`RequestParams`].
//!
//! # Example
//!
//! ```
//! use riapilayout::{ImageInfo, Mode, Scale, plan, riapi};
//!
//! let result = riapi::parse("w=800&h=600&mode=crop&scale=both");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.params.mode, Some(Mode::Crop));
//! assert_eq!(result.params.scale, Some(Scale::Both));
//!
//! let layout = plan(&ImageInfo::plain(4000, 3000), &result.params).unwrap();
//! assert!(layout.resize.is_some());
//! ```
//!
//! # Defaults
//!
//! An absent `mode` means `max` and an absent `scale` means `down`. A
//! present but unparseable value leaves the field unset, so the planner
//! reports it as soon as geometry is requested.

mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::constraint::RequestParams;

/// Result of parsing a RIAPI query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Parsed request parameters.
    pub params: RequestParams,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key that is not a level-1 layout parameter.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a RIAPI query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (params, warnings) = parse::parse_query(query);
    ParseResult { params, warnings }
}
