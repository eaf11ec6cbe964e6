use crate::block::Block;
use crate::inline;

/// Parse markdown text into a list of blocks.
///
/// Single forward pass over lines. Rules are tested in a fixed order and
/// the first match wins; a fence line always takes priority, and every
/// line maps to exactly one block (or contributes to buffered fence
/// content). No input fails.
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut in_code_block = false;
    let mut code_buffer: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        // Fence marker; any trailing language tag is ignored. The fence
        // line itself is never emitted as content.
        if line.starts_with("```") {
            if in_code_block {
                blocks.push(Block::CodeBlock {
                    content: code_buffer.join("\n"),
                });
                code_buffer.clear();
            }
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            code_buffer.push(line);
            continue;
        }

        if line.trim().is_empty() {
            blocks.push(Block::Blank);
            continue;
        }

        // Longest heading prefix first, so "#### " never matches as "# ".
        if let Some(text) = line.strip_prefix("#### ") {
            blocks.push(Block::Heading {
                level: 4,
                text: text.to_string(),
            });
        } else if let Some(text) = line.strip_prefix("### ") {
            blocks.push(Block::Heading {
                level: 3,
                text: text.to_string(),
            });
        } else if let Some(text) = line.strip_prefix("## ") {
            blocks.push(Block::Heading {
                level: 2,
                text: text.to_string(),
            });
        } else if let Some(text) = line.strip_prefix("# ") {
            blocks.push(Block::Heading {
                level: 1,
                text: text.to_string(),
            });
        } else if let Some(rest) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            blocks.push(Block::BulletItem {
                text: format!("• {rest}"),
            });
        } else if is_numbered_item(line) {
            blocks.push(Block::NumberedItem {
                text: line.to_string(),
            });
        } else {
            blocks.push(Block::Paragraph {
                runs: inline::tokenize(line),
            });
        }
    }

    // A fence left open at end of input flushes what was collected, so no
    // trailing content is dropped.
    if in_code_block && !code_buffer.is_empty() {
        blocks.push(Block::CodeBlock {
            content: code_buffer.join("\n"),
        });
    }

    blocks
}

/// One or more ASCII digits followed by ". " at the start of the line.
fn is_numbered_item(line: &str) -> bool {
    let digits = line.find(|c: char| !c.is_ascii_digit()).unwrap_or(line.len());
    digits > 0 && line[digits..].starts_with(". ")
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::block::{Block, Run};

    #[test]
    fn empty_input_yields_no_blocks() {
        assert_eq!(parse(""), vec![]);
    }

    #[test]
    fn heading_levels() {
        assert_eq!(
            parse("# One\n## Two\n### Three\n#### Four"),
            vec![
                Block::Heading { level: 1, text: "One".into() },
                Block::Heading { level: 2, text: "Two".into() },
                Block::Heading { level: 3, text: "Three".into() },
                Block::Heading { level: 4, text: "Four".into() },
            ]
        );
    }

    #[test]
    fn longest_heading_prefix_wins() {
        assert_eq!(
            parse("#### Title"),
            vec![Block::Heading { level: 4, text: "Title".into() }]
        );
    }

    #[test]
    fn five_hashes_is_a_paragraph() {
        // Only levels 1-4 are recognized.
        assert_eq!(
            parse("##### Deep"),
            vec![Block::Paragraph { runs: vec![Run::plain("##### Deep")] }]
        );
    }

    #[test]
    fn bullet_items_get_a_literal_glyph() {
        assert_eq!(
            parse("- item one\n* item two"),
            vec![
                Block::BulletItem { text: "• item one".into() },
                Block::BulletItem { text: "• item two".into() },
            ]
        );
    }

    #[test]
    fn numbered_items_keep_the_line_verbatim() {
        assert_eq!(
            parse("1. first\n12. twelfth"),
            vec![
                Block::NumberedItem { text: "1. first".into() },
                Block::NumberedItem { text: "12. twelfth".into() },
            ]
        );
    }

    #[test]
    fn number_without_period_is_a_paragraph() {
        assert_eq!(
            parse("1980 was a year"),
            vec![Block::Paragraph { runs: vec![Run::plain("1980 was a year")] }]
        );
    }

    #[test]
    fn code_fence_collects_raw_lines() {
        assert_eq!(
            parse("```\nx = 1\n```"),
            vec![Block::CodeBlock { content: "x = 1".into() }]
        );
    }

    #[test]
    fn fence_language_tag_is_ignored() {
        assert_eq!(
            parse("```rust\nlet x = 1;\n```"),
            vec![Block::CodeBlock { content: "let x = 1;".into() }]
        );
    }

    #[test]
    fn fence_beats_every_other_rule() {
        // Lines inside the fence that look like headings or lists stay raw.
        assert_eq!(
            parse("```\n# not a heading\n- not a bullet\n```"),
            vec![Block::CodeBlock { content: "# not a heading\n- not a bullet".into() }]
        );
    }

    #[test]
    fn unterminated_fence_flushes_at_end_of_input() {
        assert_eq!(
            parse("```\ntrailing"),
            vec![Block::CodeBlock { content: "trailing".into() }]
        );
    }

    #[test]
    fn open_fence_with_no_content_emits_nothing() {
        assert_eq!(parse("```"), vec![]);
    }

    #[test]
    fn blank_lines_are_preserved_as_blocks() {
        assert_eq!(
            parse("A\n\nB"),
            vec![
                Block::Paragraph { runs: vec![Run::plain("A")] },
                Block::Blank,
                Block::Paragraph { runs: vec![Run::plain("B")] },
            ]
        );
    }

    #[test]
    fn whitespace_only_line_is_blank() {
        assert_eq!(parse("   \t"), vec![Block::Blank]);
    }

    #[test]
    fn document_in_order() {
        assert_eq!(
            parse("# Title\nSome **bold** and *italic* text.\n- item one\n1. first"),
            vec![
                Block::Heading { level: 1, text: "Title".into() },
                Block::Paragraph {
                    runs: vec![
                        Run::plain("Some "),
                        Run::bold("bold"),
                        Run::plain(" and "),
                        Run::italic("italic"),
                        Run::plain(" text."),
                    ],
                },
                Block::BulletItem { text: "• item one".into() },
                Block::NumberedItem { text: "1. first".into() },
            ]
        );
    }

    #[test]
    fn non_marker_characters_survive_in_order() {
        let input = "# H\npara with **b** and `c`\n- li\n2. num\n```\nraw # text\n```";
        let blocks = parse(input);
        let text: String = blocks
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join("\n");
        // Bullet items gain a glyph; everything from the input except the
        // markers themselves must still be present, in order.
        assert_eq!(text, "H\npara with b and c\n• li\n2. num\nraw # text");
    }
}
