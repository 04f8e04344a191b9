use std::error::Error;
use std::fmt;

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};

use super::convert::RawDuplication;
use super::{cpd, dupfinder, simian};

/// The document could not be decoded as a duplication report.
///
/// Malformed markup and missing required elements both end up here; a
/// well-formed report with zero duplications is not an error and decodes
/// to an empty record list.
#[derive(Debug)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid duplication report: {}", self.message)
    }
}

impl Error for DecodeError {}

impl From<quick_xml::Error> for DecodeError {
    fn from(err: quick_xml::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<AttrError> for DecodeError {
    fn from(err: AttrError) -> Self {
        Self::new(err.to_string())
    }
}

/// The supported duplication detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Cpd,
    DupFinder,
    Simian,
}

impl Tool {
    /// Type tag stamped onto every issue converted from this format.
    pub fn tag(self) -> &'static str {
        match self {
            Tool::Cpd => "CPD",
            Tool::DupFinder => "DupFinder",
            Tool::Simian => "Simian",
        }
    }

    /// Decodes a report document into raw duplication records.
    pub fn decode(self, xml: &str) -> Result<Vec<RawDuplication>, DecodeError> {
        match self {
            Tool::Cpd => cpd::decode(xml),
            Tool::DupFinder => dupfinder::decode(xml),
            Tool::Simian => simian::decode(xml),
        }
    }
}

/// How the root element of a report document opened.
pub(crate) enum Root {
    /// `<root>…` — content follows.
    Open,
    /// `<root/>` — a report with zero records.
    Empty,
}

/// Advances the reader past the prolog to the root tag and checks that
/// its name matches `root`.
pub(crate) fn expect_root(reader: &mut Reader<&[u8]>, root: &[u8]) -> Result<Root, DecodeError> {
    loop {
        match reader.read_event()? {
            Event::Decl(_) | Event::Comment(_) | Event::DocType(_) | Event::PI(_) => {}
            Event::Start(e) if e.local_name().as_ref() == root => return Ok(Root::Open),
            Event::Empty(e) if e.local_name().as_ref() == root => return Ok(Root::Empty),
            Event::Start(e) | Event::Empty(e) => {
                return Err(DecodeError::new(format!(
                    "expected <{}> root, found <{}>",
                    String::from_utf8_lossy(root),
                    String::from_utf8_lossy(e.local_name().as_ref()),
                )));
            }
            Event::Eof => return Err(DecodeError::new("document contains no elements")),
            _ => return Err(DecodeError::new("unexpected content before root element")),
        }
    }
}

/// Looks up an attribute by local name, unescaping its value.
pub(crate) fn attr(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, DecodeError> {
    for attribute in e.attributes() {
        let attribute = attribute?;
        if attribute.key.local_name().as_ref() == name {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Looks up a required attribute.
pub(crate) fn require_attr(e: &BytesStart<'_>, name: &[u8]) -> Result<String, DecodeError> {
    attr(e, name)?.ok_or_else(|| {
        DecodeError::new(format!(
            "<{}> is missing the {} attribute",
            String::from_utf8_lossy(e.local_name().as_ref()),
            String::from_utf8_lossy(name),
        ))
    })
}

/// Looks up a required integer attribute.
pub(crate) fn require_int_attr(e: &BytesStart<'_>, name: &[u8]) -> Result<i64, DecodeError> {
    let value = require_attr(e, name)?;
    value.trim().parse().map_err(|_| {
        DecodeError::new(format!(
            "{} attribute is not a number: {value:?}",
            String::from_utf8_lossy(name),
        ))
    })
}

/// Like `require_int_attr` but for 1-based line numbers.
pub(crate) fn require_line_attr(e: &BytesStart<'_>, name: &[u8]) -> Result<usize, DecodeError> {
    let value = require_int_attr(e, name)?;
    usize::try_from(value).map_err(|_| {
        DecodeError::new(format!(
            "{} attribute is negative: {value}",
            String::from_utf8_lossy(name),
        ))
    })
}

/// Collects text and CDATA content until the end tag `end` is reached.
pub(crate) fn read_text(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<String, DecodeError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::End(e) if e.local_name().as_ref() == end => return Ok(text),
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
