use linelog::lines::{count_significant_lines, looks_binary};
use regex::{Regex, RegexBuilder};

const NONE: [&Regex; 0] = [];

fn multi_line(pattern: &str) -> Regex {
    RegexBuilder::new(pattern).multi_line(true).build().unwrap()
}

#[test]
fn empty_content_has_no_lines() {
    assert_eq!(count_significant_lines(b"", NONE, 2), 0);
}

#[test]
fn invalid_utf8_counts_as_zero() {
    let content: [u8; 9] = [0x66, 0x6f, 0xff, 0xfe, 0x0a, 0x61, 0x62, 0x63, 0x64];
    assert_eq!(count_significant_lines(&content, NONE, 2), 0);
}

#[test]
fn short_lines_are_never_counted() {
    let content = b"{\n}\n  \n\t\n);\nab\n";
    assert_eq!(count_significant_lines(content, NONE, 2), 0);
}

#[test]
fn whitespace_does_not_count_towards_length() {
    let content = b"  a b  \nabc\n   x y z   \n";
    assert_eq!(count_significant_lines(content, NONE, 2), 2);
}

#[test]
fn min_chars_is_a_strict_threshold() {
    let content = b"abc\nabcd\nabcde\n";
    assert_eq!(count_significant_lines(content, NONE, 2), 3);
    assert_eq!(count_significant_lines(content, NONE, 3), 2);
    assert_eq!(count_significant_lines(content, NONE, 0), 3);
}

#[test]
fn block_comments_are_removed_before_splitting() {
    let block = multi_line(r"/\*[\s\S]*?\*/");
    let content = b"int a = 1;\n/* first\n   second line of comment\n   third */\nint b = 2;\n";
    assert_eq!(count_significant_lines(content, [&block], 2), 2);
}

#[test]
fn noise_patterns_apply_in_order() {
    let comment = multi_line(r"#.*$");
    let strip_prints = multi_line(r"^\s*print\(.*\)\s*$");
    let content = b"value = 1 # trailing comment\n# whole line\nprint(value)\nreturn value\n";

    assert_eq!(count_significant_lines(content, [&comment], 2), 3);
    assert_eq!(count_significant_lines(content, [&comment, &strip_prints], 2), 2);
}

#[test]
fn crlf_line_endings_count_like_lf() {
    let content = b"let a = 1;\r\n\r\n}\r\nlet b = 2;\r\n";
    assert_eq!(count_significant_lines(content, NONE, 2), 2);
}

#[test]
fn binary_detection_looks_for_nul_bytes() {
    assert!(looks_binary(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"));
    assert!(!looks_binary(b"fn main() {}\n"));
    assert!(!looks_binary(b""));
}
