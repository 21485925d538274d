use twinspect_parser::{format_error, parse, ParseError};

#[test]
fn test_mismatched_tag_reports_both_names() {
    let source = "export default function A() {\n  return (\n    <div>\n      <p>text</b>\n    </div>\n  );\n}\n";
    let err = parse(source).unwrap_err();

    match &err {
        ParseError::MismatchedClosingTag { expected, found, span } => {
            assert_eq!(expected, "p");
            assert_eq!(found, "b");
            assert_eq!(&source[span.clone()], "</b>");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unclosed_element_is_eof() {
    let err = parse("export default function A() {\n  return <div>\n").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEof { .. }));
}

#[test]
fn test_unbalanced_brace_in_statement() {
    let err = parse("const a = (1, 2];\n").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_stray_closing_brace() {
    let err = parse("const a = 1;\n}\n").unwrap_err();
    assert!(matches!(err, ParseError::InvalidSyntax { .. }));
}

#[test]
fn test_format_error_points_at_file() {
    let source = "export default function A() { return <a></b>; }";
    let err = parse(source).unwrap_err();
    let rendered = format_error(source, "A.tsx", &err);

    assert!(rendered.contains("A.tsx"));
}
