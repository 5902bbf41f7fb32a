//! Word documents: body paragraphs in document order.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{open_package, path_is, read_part};
use crate::extract::ExtractResult;

const DOCUMENT_PART: &str = "word/document.xml";

const BODY_PARAGRAPH: &[&[u8]] = &[b"document", b"body", b"p"];
const RUN: &[&[u8]] = &[b"document", b"body", b"p", b"r"];
const LINKED_RUN: &[&[u8]] = &[b"document", b"body", b"p", b"hyperlink", b"r"];

/// Join the non-blank body paragraphs with newlines.
///
/// Only direct children of the body count as paragraphs; table cells and
/// text boxes are not visited.
pub fn extract_docx(bytes: &[u8]) -> ExtractResult<String> {
    let mut package = open_package(bytes)?;
    let xml = read_part(&mut package, DOCUMENT_PART)?;

    let paragraphs = body_paragraphs(&xml)?;
    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn in_run(stack: &[Vec<u8>]) -> bool {
    path_is(stack, RUN) || path_is(stack, LINKED_RUN)
}

fn body_paragraphs(xml: &[u8]) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(e.local_name().as_ref().to_vec());
                if path_is(&stack, BODY_PARAGRAPH) {
                    current = Some(String::new());
                }
            }
            Event::End(_) => {
                if path_is(&stack, BODY_PARAGRAPH) {
                    paragraphs.extend(current.take());
                }
                stack.pop();
            }
            Event::Empty(e) => {
                if let Some(text) = current.as_mut() {
                    if in_run(&stack) {
                        match e.local_name().as_ref() {
                            b"tab" => text.push('\t'),
                            b"br" | b"cr" => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(t) => {
                if let Some(text) = current.as_mut() {
                    let parent = &stack[..stack.len().saturating_sub(1)];
                    if stack.last().map(Vec::as_slice) == Some(b"t".as_slice()) && in_run(parent) {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
