use super::{splice_in, splice_out, substring, LineIndex, Position, Span, SpanError};

fn span(start: usize, end: usize) -> Span {
    let at = |offset| Position {
        offset,
        line: 0,
        column: 0,
    };
    Span {
        start: at(start),
        end: at(end),
    }
}

#[test]
fn test_line_index_positions() {
    let index = LineIndex::new("ab\ncd\n");

    assert_eq!(
        index.position(0),
        Position {
            offset: 0,
            line: 0,
            column: 0
        }
    );
    assert_eq!(index.position(4).line, 1);
    assert_eq!(index.position(4).column, 1);
    assert_eq!(index.position(6).line, 2, "offset past the last newline");
    assert_eq!(index.position(6).column, 0);
    assert_eq!(index.position(99).offset, 6, "clamped to the text length");
    assert_eq!(index.line_start(5), 3);
}

#[test]
fn test_substring_matches_span_length() {
    let text = "# T\n- item\n  - sub\n";
    let index = LineIndex::new(text);
    let item = index.span(4, 18);

    let extracted = substring(text, &item).unwrap();

    assert_eq!(extracted, "- item\n  - sub");
    assert_eq!(extracted.len(), item.len());
    assert_eq!(item.start.line, 1);
    assert_eq!(item.end.line, 2);
}

#[test]
fn test_substring_rejects_stale_offsets() {
    assert_eq!(
        substring("short", &span(0, 100)),
        Err(SpanError::OutOfRange {
            start: 0,
            end: 100,
            len: 5
        })
    );
    assert_eq!(
        substring("é", &span(0, 1)),
        Err(SpanError::NotCharBoundary { offset: 1 })
    );
}

#[test]
fn test_splice_out_middle_item() {
    let text = "## Tasks\n- a\n- b\n- c\n";

    assert_eq!(splice_out(text, &span(13, 16)).unwrap(), "## Tasks\n- a\n- c\n");
}

#[test]
fn test_splice_out_collapses_blank_run() {
    let text = "p\n\n- item\n\n\nq\n";

    assert_eq!(splice_out(text, &span(3, 9)).unwrap(), "p\n\nq\n");
}

#[test]
fn test_splice_out_keeps_next_line_indentation() {
    let text = "x\n- a\n   next\n";

    assert_eq!(splice_out(text, &span(2, 5)).unwrap(), "x\n   next\n");
}

#[test]
fn test_splice_out_at_end_of_text() {
    assert_eq!(splice_out("a\n- item\n", &span(2, 8)).unwrap(), "a\n");
}

#[test]
fn test_splice_in_after_blank_line() {
    let text = "## Open\n\n- a\n\n## Done\n";

    assert_eq!(
        splice_in(text, 14, "- b").unwrap(),
        "## Open\n\n- a\n\n- b\n\n## Done\n"
    );
}

#[test]
fn test_splice_in_adds_one_blank_line() {
    let text = "## Open\n- a\n## Done\n";

    assert_eq!(
        splice_in(text, 12, "- b").unwrap(),
        "## Open\n- a\n\n- b\n\n## Done\n"
    );
}

#[test]
fn test_splice_in_at_end_without_newline() {
    assert_eq!(splice_in("# T\n- a", 7, "- b").unwrap(), "# T\n- a\n\n- b\n");
}

#[test]
fn test_splice_in_empty_document() {
    assert_eq!(splice_in("", 0, "- b").unwrap(), "- b\n");
}

#[test]
fn test_splice_in_trims_block() {
    assert_eq!(
        splice_in("x\n", 2, "\n\n- b\n  - c\n\n").unwrap(),
        "x\n\n- b\n  - c\n"
    );
}

#[test]
fn test_splice_in_rejects_offset_past_end() {
    assert!(matches!(
        splice_in("abc", 4, "- b"),
        Err(SpanError::OutOfRange { .. })
    ));
}

#[test]
fn test_splice_in_keeps_crlf() {
    let text = "## Open\r\n\r\n- a\r\n\r\n## Done\r\n";

    assert_eq!(
        splice_in(text, 18, "- b\n  - c").unwrap(),
        "## Open\r\n\r\n- a\r\n\r\n- b\r\n  - c\r\n\r\n## Done\r\n"
    );
    assert_eq!(
        splice_in("- a\r\n", 5, "- b").unwrap(),
        "- a\r\n\r\n- b\r\n"
    );
}

#[test]
fn test_splice_in_converts_crlf_block_for_lf_text() {
    assert_eq!(
        splice_in("- a\n", 4, "- b\r\n  - c\r\n").unwrap(),
        "- a\n\n- b\n  - c\n"
    );
}

#[test]
fn test_splice_out_crlf() {
    let text = "- keep\r\n- item\r\n\r\n## Later\r\n";

    assert_eq!(splice_out(text, &span(8, 14)).unwrap(), "- keep\r\n## Later\r\n");
}
