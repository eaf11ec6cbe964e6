/// A contiguous fragment of paragraph text sharing one style.
///
/// Styles are mutually exclusive: a run is plain, bold, italic, or code,
/// never a combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            code: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self {
            code: true,
            ..Self::plain(text)
        }
    }
}

/// Block-level elements parsed from Markdown, in input line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        /// 1 through 4.
        level: u8,
        text: String,
    },
    /// Unstyled list line; `text` carries a literal leading "• " glyph.
    BulletItem { text: String },
    /// Unstyled list line; the original numeral, period and text verbatim.
    NumberedItem { text: String },
    /// Raw fence content, lines joined by newlines.
    CodeBlock { content: String },
    /// A blank input line, preserved as a distinct output block.
    Blank,
    Paragraph { runs: Vec<Run> },
}

impl Block {
    /// The block's text with all style markers already stripped.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. }
            | Block::BulletItem { text }
            | Block::NumberedItem { text } => text.clone(),
            Block::CodeBlock { content } => content.clone(),
            Block::Blank => String::new(),
            Block::Paragraph { runs } => runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}
