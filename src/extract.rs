//! Markdown extraction from an existing DOCX package.
//!
//! Streams word/document.xml directly instead of going through an HTML
//! intermediate: paragraph styles map to heading and list prefixes, run
//! properties map back to inline markers.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use crate::error::DocxError;

/// Extract markdown text from DOCX bytes.
pub fn docx_to_markdown(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    match archive.by_name("word/document.xml") {
        Ok(mut part) => {
            part.read_to_string(&mut xml)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(DocxError::MissingPart("word/document.xml"));
        }
        Err(err) => return Err(err.into()),
    }
    parse_document_xml(&xml)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunStyle {
    bold: bool,
    italic: bool,
    code: bool,
}

fn parse_document_xml(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut blocks: Vec<String> = Vec::new();

    let mut para_style: Option<String> = None;
    let mut para_runs: Vec<(String, RunStyle)> = Vec::new();
    let mut run_style = RunStyle::default();
    let mut run_text = String::new();
    let mut in_run_props = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                match local_name(e.name().as_ref()) {
                    b"p" => {
                        para_style = None;
                        para_runs.clear();
                    }
                    b"r" => {
                        run_style = RunStyle::default();
                        run_text.clear();
                    }
                    b"rPr" => in_run_props = true,
                    b"t" => in_text = true,
                    _ => handle_property(e, in_run_props, &mut para_style, &mut run_style, &mut run_text),
                }
            }
            Event::Empty(ref e) => {
                handle_property(e, in_run_props, &mut para_style, &mut run_style, &mut run_text);
            }
            Event::Text(e) => {
                if in_text {
                    run_text.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"rPr" => in_run_props = false,
                b"r" => {
                    if !run_text.is_empty() {
                        para_runs.push((std::mem::take(&mut run_text), run_style));
                    }
                }
                b"p" => {
                    let style = para_style.take();
                    let runs = std::mem::take(&mut para_runs);
                    if let Some(block) = paragraph_to_markdown(style.as_deref(), &runs) {
                        blocks.push(block);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(blocks.join("\n\n"))
}

/// Leaf elements carrying paragraph or run properties. These can appear as
/// either empty or start tags depending on the producer.
fn handle_property(
    e: &BytesStart,
    in_run_props: bool,
    para_style: &mut Option<String>,
    run_style: &mut RunStyle,
    run_text: &mut String,
) {
    match local_name(e.name().as_ref()) {
        b"pStyle" => {
            if let Some(value) = attr_value(e, b"val") {
                *para_style = Some(value);
            }
        }
        b"b" if in_run_props => run_style.bold = toggle_on(e),
        b"i" if in_run_props => run_style.italic = toggle_on(e),
        b"rFonts" if in_run_props => {
            if let Some(font) = attr_value(e, b"ascii") {
                if is_monospace(&font) {
                    run_style.code = true;
                }
            }
        }
        b"br" => run_text.push('\n'),
        b"tab" => run_text.push('\t'),
        _ => {}
    }
}

fn paragraph_to_markdown(style: Option<&str>, runs: &[(String, RunStyle)]) -> Option<String> {
    let plain: String = runs.iter().map(|(t, _)| t.as_str()).collect();

    if let Some(level) = heading_level(style) {
        if plain.trim().is_empty() {
            return None;
        }
        return Some(format!("{} {plain}", "#".repeat(level)));
    }

    if style == Some("ListParagraph") {
        if plain.trim().is_empty() {
            return None;
        }
        return Some(format!("- {plain}"));
    }

    // A single monospaced run spanning several lines reads back as a fence.
    if let [(text, style)] = runs {
        if style.code && text.contains('\n') {
            return Some(format!("```\n{text}\n```"));
        }
    }

    let styled: String = runs.iter().map(|(t, s)| apply_markers(t, *s)).collect();
    if styled.trim().is_empty() {
        None
    } else {
        Some(styled)
    }
}

fn heading_level(style: Option<&str>) -> Option<usize> {
    match style? {
        "Title" | "Heading1" => Some(1),
        "Heading2" => Some(2),
        "Heading3" => Some(3),
        "Heading4" => Some(4),
        _ => None,
    }
}

fn apply_markers(text: &str, style: RunStyle) -> String {
    if text.is_empty() {
        return String::new();
    }
    if style.code {
        format!("`{text}`")
    } else if style.bold {
        format!("**{text}**")
    } else if style.italic {
        format!("*{text}*")
    } else {
        text.to_string()
    }
}

fn is_monospace(font: &str) -> bool {
    matches!(font, "Consolas" | "Courier" | "Courier New" | "Menlo" | "Monaco")
}

/// A `w:val` of "0", "false" or "none" switches the property off.
fn toggle_on(e: &BytesStart) -> bool {
    match attr_value(e, b"val") {
        Some(v) => v != "0" && v != "false" && v != "none",
        None => true,
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

fn attr_value(e: &BytesStart, name: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if local_name(attr.key.as_ref()) == name {
            if let Ok(value) = attr.unescape_value() {
                return Some(value.into_owned());
            }
        }
    }
    None
}
