use super::*;

const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<DuplicatesReport ToolsVersion="8.1">
  <Statistics>
    <CodebaseCost>17</CodebaseCost>
    <TotalFragmentsCost>17</TotalFragmentsCost>
    <TotalDuplicatesCost>17</TotalDuplicatesCost>
  </Statistics>
  <Duplicates>
    <Duplicate Cost="32">
      <Fragment>
        <FileName>MailService.cs</FileName>
        <LineRange Start="23" End="42"/>
        <OffsetRange Start="628" End="1188"/>
        <Text>if (mail == null) throw new ArgumentNullException();</Text>
      </Fragment>
      <Fragment>
        <FileName>SmsService.cs</FileName>
        <LineRange Start="104" End="123"/>
        <OffsetRange Start="3217" End="3777"/>
        <Text>if (mail == null) throw new ArgumentNullException();</Text>
      </Fragment>
    </Duplicate>
  </Duplicates>
</DuplicatesReport>
"#;

#[test]
fn decodes_duplicates_with_cost_and_fragments() {
    let records = decode(REPORT).unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.lines, 32);
    assert!(record.fragment.is_none());
    assert_eq!(record.occurrences.len(), 2);

    let first = &record.occurrences[0];
    assert_eq!(first.file_name, "MailService.cs");
    assert_eq!(first.line_start, 23);
    assert_eq!(first.line_end, 42);
    assert_eq!(
        first.fragment.as_deref(),
        Some("if (mail == null) throw new ArgumentNullException();")
    );

    let second = &record.occurrences[1];
    assert_eq!(second.file_name, "SmsService.cs");
    assert_eq!(second.line_start, 104);
    assert_eq!(second.line_end, 123);
}

#[test]
fn statistics_block_is_ignored() {
    // the Statistics numbers must not leak into the records
    let records = decode(REPORT).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].lines, 32);
}

#[test]
fn fragment_without_text_is_allowed() {
    let xml = r#"<DuplicatesReport><Duplicates><Duplicate Cost="5">
        <Fragment>
          <FileName>a.cs</FileName>
          <LineRange Start="1" End="5"/>
        </Fragment>
      </Duplicate></Duplicates></DuplicatesReport>"#;

    let records = decode(xml).unwrap();
    assert_eq!(records[0].occurrences[0].fragment, None);
}

#[test]
fn missing_cost_attribute_is_an_error() {
    let xml = r#"<DuplicatesReport><Duplicates><Duplicate>
        <Fragment><FileName>a.cs</FileName><LineRange Start="1" End="5"/></Fragment>
      </Duplicate></Duplicates></DuplicatesReport>"#;

    let err = decode(xml).unwrap_err();
    assert!(err.to_string().contains("Cost"));
}

#[test]
fn missing_file_name_is_an_error() {
    let xml = r#"<DuplicatesReport><Duplicates><Duplicate Cost="5">
        <Fragment><LineRange Start="1" End="5"/></Fragment>
      </Duplicate></Duplicates></DuplicatesReport>"#;

    let err = decode(xml).unwrap_err();
    assert!(err.to_string().contains("FileName"));
}

#[test]
fn missing_line_range_is_an_error() {
    let xml = r#"<DuplicatesReport><Duplicates><Duplicate Cost="5">
        <Fragment><FileName>a.cs</FileName></Fragment>
      </Duplicate></Duplicates></DuplicatesReport>"#;

    let err = decode(xml).unwrap_err();
    assert!(err.to_string().contains("LineRange"));
}

#[test]
fn duplicate_without_fragments_decodes_to_zero_occurrences() {
    let xml = r#"<DuplicatesReport><Duplicates><Duplicate Cost="5"/>
      </Duplicates></DuplicatesReport>"#;

    // an empty-element Duplicate carries no fragments at all
    let records = decode(xml).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].lines, 5);
    assert!(records[0].occurrences.is_empty());
}
