use serde::Serialize;

/// A piece of rendered log text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Fragment {
    Text(String),
    Break,
}

/// Render `text` as line fragments separated by breaks.
///
/// The break after a line is skipped when the line's index equals its own
/// length minus one (length in UTF-16 units, as the webview counts it). This
/// is not "skip the last line"; the rendered output keeps that behaviour
/// until someone confirms what it should be.
pub fn break_string(text: &str) -> Vec<Fragment> {
    text.split('\n')
        .enumerate()
        .flat_map(|(index, line)| line_fragments(index, line))
        .collect()
}

/// Fragments for the single line at `index`. They depend only on the index
/// and the line, so a growing text can be rendered one appended line at a time.
pub fn line_fragments(index: usize, line: &str) -> Vec<Fragment> {
    let mut fragments = vec![Fragment::Text(line.to_string())];
    let last_unit = line.encode_utf16().count() as i64 - 1;
    if index as i64 != last_unit {
        fragments.push(Fragment::Break);
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Fragment {
        Fragment::Text(s.to_string())
    }

    #[test]
    fn three_single_char_lines() {
        assert_eq!(
            break_string("a\nb\nc"),
            vec![text("a"), text("b"), Fragment::Break, text("c"), Fragment::Break]
        );
    }

    #[test]
    fn empty_input_still_gets_a_break() {
        assert_eq!(break_string(""), vec![text(""), Fragment::Break]);
    }

    #[test]
    fn accumulated_log_starts_with_blank_line() {
        // "foo" sits at index 2 and has three units, "last" at index 3 has four.
        assert_eq!(
            break_string("\nfirst\nfoo\nlast"),
            vec![
                text(""),
                Fragment::Break,
                text("first"),
                Fragment::Break,
                text("foo"),
                text("last"),
            ]
        );
    }

    #[test]
    fn lines_whose_length_tracks_their_index_never_break() {
        assert_eq!(
            break_string("x\nyy\nabc"),
            vec![text("x"), text("yy"), text("abc")]
        );
    }

    #[test]
    fn length_counts_utf16_units() {
        // "é" is one unit, "😀" is two.
        assert_eq!(break_string("é"), vec![text("é")]);
        assert_eq!(
            break_string("😀\nx"),
            vec![text("😀"), Fragment::Break, text("x"), Fragment::Break]
        );
    }

    #[test]
    fn appending_lines_one_by_one_matches_whole_text() {
        let log = "\nLoading BuildTools version\nab\nx\n😀😀\n";
        let appended: Vec<Fragment> = log
            .split('\n')
            .enumerate()
            .flat_map(|(index, line)| line_fragments(index, line))
            .collect();
        assert_eq!(appended, break_string(log));
        assert_eq!(line_fragments(2, "abc"), vec![text("abc")]);
        assert_eq!(line_fragments(3, "abc"), vec![text("abc"), Fragment::Break]);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&break_string("a\nb")).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"text","text":"a"},{"kind":"text","text":"b"},{"kind":"break"}]"#
        );
    }
}
