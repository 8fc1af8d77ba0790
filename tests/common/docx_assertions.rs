/// Assert that the document body contains a `w:t` with exactly this text
#[macro_export]
macro_rules! assert_docx_contains_text {
    ($docx:expr, $text:expr) => {
        let all = $docx.all_text();
        assert!(
            all.iter().any(|t| t == $text),
            "document should contain '{}', but its texts were:\n{:#?}",
            $text,
            all
        );
    };
}

/// Assert that no `w:t` in the document body contains this text
#[macro_export]
macro_rules! assert_docx_not_contains_text {
    ($docx:expr, $text:expr) => {
        let all = $docx.all_text();
        assert!(
            !all.iter().any(|t| t.contains($text)),
            "document should not contain '{}', but its texts were:\n{:#?}",
            $text,
            all
        );
    };
}

/// Assert that a package part exists
#[macro_export]
macro_rules! assert_docx_has_part {
    ($docx:expr, $part:expr) => {
        assert!(
            $docx.parts.contains_key($part),
            "package should contain part '{}', but has {:?}",
            $part,
            $docx.part_names()
        );
    };
}
