use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::convert::{RawDuplication, RawOccurrence};
use super::decode::{self, DecodeError, Root};

/// Decodes a Simian XML report.
///
/// Simian never emits the duplicated source text, so records and
/// occurrences carry no fragment and every group stays empty. Each
/// `<set>` is one record, each `<block>` one occurrence with explicit
/// start and end line numbers.
pub(crate) fn decode(xml: &str) -> Result<Vec<RawDuplication>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    if let Root::Empty = decode::expect_root(&mut reader, b"simian")? {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"set" => {
                records.push(decode_set(&mut reader, &e)?);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"set" => {
                records.push(RawDuplication {
                    lines: decode::require_int_attr(&e, b"lineCount")?,
                    fragment: None,
                    occurrences: Vec::new(),
                });
            }
            Event::End(e) if e.local_name().as_ref() == b"simian" => break,
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }
    Ok(records)
}

fn decode_set(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<RawDuplication, DecodeError> {
    let lines = decode::require_int_attr(start, b"lineCount")?;
    let mut occurrences = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"block" => {
                occurrences.push(decode_block(&e)?);
            }
            Event::End(e) if e.local_name().as_ref() == b"set" => break,
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }

    Ok(RawDuplication {
        lines,
        fragment: None,
        occurrences,
    })
}

fn decode_block(e: &BytesStart<'_>) -> Result<RawOccurrence, DecodeError> {
    Ok(RawOccurrence {
        file_name: decode::require_attr(e, b"sourceFile")?,
        line_start: decode::require_line_attr(e, b"startLineNumber")?,
        line_end: decode::require_line_attr(e, b"endLineNumber")?,
        fragment: None,
    })
}

#[cfg(test)]
#[path = "simian_test.rs"]
mod tests;
