use crate::block::Run;

/// Split one line of text into styled runs.
///
/// Single left-to-right scan. Plain text accumulates until a styled span
/// is found; unbalanced markers degrade to plain text, so the concatenated
/// run text always reconstructs the line minus the markers themselves.
pub fn tokenize(line: &str) -> Vec<Run> {
    let chars: Vec<char> = line.chars().collect();
    let mut runs = Vec::new();
    let mut pending = String::new();
    let mut i = 0;

    while i < chars.len() {
        // Bold: ** ... **. A dangling opener is not a marker; the position
        // is retried under the rules below instead of swallowing the line.
        if chars[i] == '*' && chars.get(i + 1) == Some(&'*') {
            if let Some(close) = find_pair(&chars, i + 2) {
                flush_plain(&mut runs, &mut pending);
                runs.push(Run::bold(collect(&chars[i + 2..close])));
                i = close + 2;
                continue;
            }
        }

        // Italic: * or _, excluding positions adjacent to a bold marker.
        // An out-of-bounds neighbor counts as "not a marker".
        if (chars[i] == '*' || chars[i] == '_')
            && !(i > 0 && chars[i - 1] == '*')
            && chars.get(i + 1) != Some(&'*')
        {
            let marker = chars[i];
            if let Some(close) = find_italic_close(&chars, i + 1, marker) {
                flush_plain(&mut runs, &mut pending);
                runs.push(Run::italic(collect(&chars[i + 1..close])));
                i = close + 1;
                continue;
            }
        }

        // Inline code: ` ... `
        if chars[i] == '`' {
            if let Some(close) = chars[i + 1..].iter().position(|&c| c == '`') {
                let close = i + 1 + close;
                flush_plain(&mut runs, &mut pending);
                runs.push(Run::code(collect(&chars[i + 1..close])));
                i = close + 1;
                continue;
            }
        }

        pending.push(chars[i]);
        i += 1;
    }

    flush_plain(&mut runs, &mut pending);

    // Never hand the serializer an empty run list.
    if runs.is_empty() {
        runs.push(Run::plain(line));
    }
    runs
}

fn flush_plain(runs: &mut Vec<Run>, pending: &mut String) {
    if !pending.is_empty() {
        runs.push(Run::plain(std::mem::take(pending)));
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Position of the next "**" at or after `from`.
fn find_pair(chars: &[char], from: usize) -> Option<usize> {
    let mut j = from;
    while j + 1 < chars.len() {
        if chars[j] == '*' && chars[j + 1] == '*' {
            return Some(j);
        }
        j += 1;
    }
    None
}

/// Next occurrence of `marker` at or after `from` whose preceding character
/// is not itself the marker (guards against the tail of a bold pair).
fn find_italic_close(chars: &[char], from: usize, marker: char) -> Option<usize> {
    let mut j = from;
    while j < chars.len() {
        if chars[j] == marker && chars[j - 1] != marker {
            return Some(j);
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::tokenize;
    use crate::block::Run;

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(tokenize("just words"), vec![Run::plain("just words")]);
    }

    #[test]
    fn empty_line_yields_one_empty_plain_run() {
        assert_eq!(tokenize(""), vec![Run::plain("")]);
    }

    #[test]
    fn bold_span() {
        assert_eq!(
            tokenize("Some **bold** text"),
            vec![
                Run::plain("Some "),
                Run::bold("bold"),
                Run::plain(" text"),
            ]
        );
    }

    #[test]
    fn italic_with_star_and_underscore() {
        assert_eq!(
            tokenize("*a* and _b_"),
            vec![
                Run::italic("a"),
                Run::plain(" and "),
                Run::italic("b"),
            ]
        );
    }

    #[test]
    fn inline_code() {
        assert_eq!(
            tokenize("call `foo()` here"),
            vec![
                Run::plain("call "),
                Run::code("foo()"),
                Run::plain(" here"),
            ]
        );
    }

    #[test]
    fn mixed_styles_in_order() {
        assert_eq!(
            tokenize("Some **bold** and *italic* text."),
            vec![
                Run::plain("Some "),
                Run::bold("bold"),
                Run::plain(" and "),
                Run::italic("italic"),
                Run::plain(" text."),
            ]
        );
    }

    #[test]
    fn dangling_bold_opener_stays_plain() {
        assert_eq!(tokenize("**bold text"), vec![Run::plain("**bold text")]);
    }

    #[test]
    fn dangling_italic_marker_stays_plain() {
        assert_eq!(tokenize("a * b"), vec![Run::plain("a * b")]);
    }

    #[test]
    fn dangling_backtick_stays_plain() {
        assert_eq!(tokenize("a ` b"), vec![Run::plain("a ` b")]);
    }

    #[test]
    fn italic_marker_at_line_start_and_end() {
        assert_eq!(tokenize("*edge*"), vec![Run::italic("edge")]);
    }

    #[test]
    fn star_adjacent_to_bold_marker_is_not_italic() {
        // The exclusion rule: a * touching another * never opens a span.
        assert_eq!(
            tokenize("**b***i*"),
            vec![Run::bold("b"), Run::plain("*i*")]
        );
    }

    #[test]
    fn concatenated_text_drops_only_markers() {
        let runs = tokenize("mix **b** _i_ `c` end");
        let text: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "mix b i c end");
    }

    #[test]
    fn styles_never_combine() {
        for run in tokenize("**b** *i* `c` plain") {
            let styled = [run.bold, run.italic, run.code];
            assert!(styled.iter().filter(|&&s| s).count() <= 1);
        }
    }
}
