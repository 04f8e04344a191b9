use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::convert::{RawDuplication, RawOccurrence};
use super::decode::{self, DecodeError, Root};

/// Decodes a ReSharper DupFinder XML report.
///
/// DupFinder has no record-level fragment; each `<Fragment>` carries its
/// own `<Text>`, which the conversion folds into the shared group (the
/// first non-blank one wins). The `Cost` attribute of a `<Duplicate>`
/// drives the severity of all its occurrences.
pub(crate) fn decode(xml: &str) -> Result<Vec<RawDuplication>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    if let Root::Empty = decode::expect_root(&mut reader, b"DuplicatesReport")? {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"Duplicate" => {
                records.push(decode_duplicate(&mut reader, &e)?);
            }
            Event::Empty(e) if e.local_name().as_ref() == b"Duplicate" => {
                // no fragments at all; a record with zero occurrences
                records.push(RawDuplication {
                    lines: decode::require_int_attr(&e, b"Cost")?,
                    fragment: None,
                    occurrences: Vec::new(),
                });
            }
            Event::End(e) if e.local_name().as_ref() == b"DuplicatesReport" => break,
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }
    Ok(records)
}

fn decode_duplicate(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<RawDuplication, DecodeError> {
    let cost = decode::require_int_attr(start, b"Cost")?;
    let mut occurrences = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"Fragment" => {
                occurrences.push(decode_fragment(reader)?);
            }
            Event::End(e) if e.local_name().as_ref() == b"Duplicate" => break,
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }

    Ok(RawDuplication {
        lines: cost,
        fragment: None,
        occurrences,
    })
}

fn decode_fragment(reader: &mut Reader<&[u8]>) -> Result<RawOccurrence, DecodeError> {
    let mut file_name = None;
    let mut range = None;
    let mut text = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"FileName" => file_name = Some(decode::read_text(reader, b"FileName")?),
                b"Text" => text = Some(decode::read_text(reader, b"Text")?),
                b"LineRange" => {
                    range = Some(decode_range(&e)?);
                    reader.read_to_end(e.name())?;
                }
                // OffsetRange and anything else is irrelevant here
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) if e.local_name().as_ref() == b"LineRange" => {
                range = Some(decode_range(&e)?);
            }
            Event::End(e) if e.local_name().as_ref() == b"Fragment" => break,
            Event::Eof => return Err(DecodeError::new("unexpected end of document")),
            _ => {}
        }
    }

    let file_name =
        file_name.ok_or_else(|| DecodeError::new("<Fragment> is missing <FileName>"))?;
    let (line_start, line_end) =
        range.ok_or_else(|| DecodeError::new("<Fragment> is missing <LineRange>"))?;
    Ok(RawOccurrence {
        file_name,
        line_start,
        line_end,
        fragment: text,
    })
}

fn decode_range(e: &BytesStart<'_>) -> Result<(usize, usize), DecodeError> {
    let start = decode::require_line_attr(e, b"Start")?;
    let end = decode::require_line_attr(e, b"End")?;
    Ok((start, end))
}

#[cfg(test)]
#[path = "dupfinder_test.rs"]
mod tests;
