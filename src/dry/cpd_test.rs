use super::*;

const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pmd-cpd>
   <duplication lines="36" tokens="247">
      <file line="76" path="ReporterA.java"/>
      <file line="69" path="PublisherA.java"/>
      <codefragment><![CDATA[    public void send() {
        publish(events);
    }]]></codefragment>
   </duplication>
   <duplication lines="12" tokens="90">
      <file line="5" path="Util.java"/>
      <file line="20" path="Util.java"/>
      <codefragment>int max = a &gt; b ? a : b;</codefragment>
   </duplication>
</pmd-cpd>
"#;

#[test]
fn decodes_records_with_files_and_fragment() {
    let records = decode(REPORT).unwrap();

    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.lines, 36);
    assert_eq!(first.occurrences.len(), 2);
    assert_eq!(first.occurrences[0].file_name, "ReporterA.java");
    assert_eq!(first.occurrences[0].line_start, 76);
    assert_eq!(first.occurrences[0].line_end, 111);
    assert_eq!(first.occurrences[1].file_name, "PublisherA.java");
    assert_eq!(first.occurrences[1].line_start, 69);
    assert_eq!(first.occurrences[1].line_end, 104);
}

#[test]
fn fragment_is_carried_once_per_record() {
    let records = decode(REPORT).unwrap();

    let fragment = records[0].fragment.as_deref().unwrap();
    assert!(fragment.contains("public void send()"));
    // CPD occurrences never carry their own fragment
    assert!(records[0].occurrences.iter().all(|o| o.fragment.is_none()));
}

#[test]
fn entities_in_fragments_are_unescaped() {
    let records = decode(REPORT).unwrap();

    assert_eq!(
        records[1].fragment.as_deref(),
        Some("int max = a > b ? a : b;")
    );
}

#[test]
fn same_file_may_appear_twice_in_one_record() {
    let records = decode(REPORT).unwrap();

    let second = &records[1];
    assert_eq!(second.occurrences[0].file_name, "Util.java");
    assert_eq!(second.occurrences[1].file_name, "Util.java");
    assert_eq!(second.occurrences[0].line_start, 5);
    assert_eq!(second.occurrences[1].line_start, 20);
}

#[test]
fn missing_lines_attribute_is_an_error() {
    let xml = r#"<pmd-cpd><duplication tokens="3"><file line="1" path="a"/></duplication></pmd-cpd>"#;
    let err = decode(xml).unwrap_err();
    assert!(err.to_string().contains("lines"));
}

#[test]
fn missing_path_attribute_is_an_error() {
    let xml = r#"<pmd-cpd><duplication lines="5"><file line="1"/></duplication></pmd-cpd>"#;
    assert!(decode(xml).is_err());
}

#[test]
fn non_numeric_line_attribute_is_an_error() {
    let xml = r#"<pmd-cpd><duplication lines="5"><file line="x" path="a"/></duplication></pmd-cpd>"#;
    assert!(decode(xml).is_err());
}

#[test]
fn record_without_files_decodes_to_zero_occurrences() {
    let xml = r#"<pmd-cpd><duplication lines="5"><codefragment>x</codefragment></duplication></pmd-cpd>"#;
    let records = decode(xml).unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0].occurrences.is_empty());
}

#[test]
fn zero_line_count_collapses_to_the_start_line() {
    let xml = r#"<pmd-cpd><duplication lines="0"><file line="7" path="a"/></duplication></pmd-cpd>"#;
    let records = decode(xml).unwrap();

    assert_eq!(records[0].occurrences[0].line_start, 7);
    assert_eq!(records[0].occurrences[0].line_end, 7);
}
