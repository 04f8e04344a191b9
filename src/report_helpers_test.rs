use super::*;

#[test]
fn separator_has_requested_width() {
    let sep = separator(10);
    assert_eq!(sep.chars().count(), 10);
    assert!(sep.chars().all(|c| c == '\u{2500}'));
}

#[test]
fn separator_zero_width_is_empty() {
    assert_eq!(separator(0), "");
}

#[test]
fn print_json_stdout_accepts_any_serializable() {
    print_json_stdout(&serde_json::json!({"ok": true})).unwrap();
}
