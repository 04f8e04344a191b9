use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::convert::{RawDuplication, RawOccurrence};
use super::decode::{self, DecodeError, Root};

/// Decodes a PMD CPD XML report.
///
/// CPD carries the fragment once per `<duplication>`, so the record is
/// created with its fragment already known. `<file>` elements only give
/// a start line; the end line is derived from the record's line count.
pub(crate) fn decode(xml: &str) -> Result<Vec<RawDuplication>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    if let Root::Empty = decode::expect_root(&mut reader, b"pmd-cpd")? {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"duplication" => {
                records.push(decode_duplication(&mut reader, &e)?);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"duplication" => {
                records.push(RawDuplication {
                    lines: decode::require_int_attr(&e, b"lines")?,
                    fragment: None,
                    occurrences: Vec::new(),
                });
            }
            Event::End(e) if e.local_name().as_ref() == b"pmd-cpd" => break,
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }
    Ok(records)
}

fn decode_duplication(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<RawDuplication, DecodeError> {
    let lines = decode::require_int_attr(start, b"lines")?;
    let mut fragment = None;
    let mut occurrences = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"file" => {
                occurrences.push(decode_file(&e, lines)?);
            }
            Event::Start(e) if e.local_name().as_ref() == b"codefragment" => {
                fragment = Some(decode::read_text(reader, b"codefragment")?);
            }
            Event::End(e) if e.local_name().as_ref() == b"duplication" => break,
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }

    Ok(RawDuplication {
        lines,
        fragment,
        occurrences,
    })
}

fn decode_file(e: &BytesStart<'_>, lines: i64) -> Result<RawOccurrence, DecodeError> {
    let file_name = decode::require_attr(e, b"path")?;
    let line_start = decode::require_line_attr(e, b"line")?;
    // end = start + lines - 1; a degenerate line count collapses the
    // occurrence to its start line
    let line_end = if lines > 0 {
        line_start.saturating_add(lines as usize - 1)
    } else {
        line_start
    };
    Ok(RawOccurrence {
        file_name,
        line_start,
        line_end,
        fragment: None,
    })
}

#[cfg(test)]
#[path = "cpd_test.rs"]
mod tests;
