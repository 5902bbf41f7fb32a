//! Presentations: shape text in shape order within slide order.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::{open_package, path_is, read_part, Package};
use crate::extract::{ExtractError, ExtractResult};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

const SHAPE: &[&[u8]] = &[b"sld", b"cSld", b"spTree", b"sp"];
const TEXT_BODY: &[&[u8]] = &[b"sld", b"cSld", b"spTree", b"sp", b"txBody"];
const PARAGRAPH: &[&[u8]] = &[b"sld", b"cSld", b"spTree", b"sp", b"txBody", b"p"];
const RUN_TEXT: &[&[u8]] = &[b"sld", b"cSld", b"spTree", b"sp", b"txBody", b"p", b"r", b"t"];
const FIELD_TEXT: &[&[u8]] = &[b"sld", b"cSld", b"spTree", b"sp", b"txBody", b"p", b"fld", b"t"];

/// Join the text of every text-bearing shape with newlines.
///
/// Slides follow the presentation's slide list; shapes follow the slide's
/// shape tree. Shapes whose text is blank are skipped.
pub fn extract_pptx(bytes: &[u8]) -> ExtractResult<String> {
    let mut package = open_package(bytes)?;
    let slides = slide_parts(&mut package)?;
    debug!(slides = slides.len(), "Reading presentation");

    let mut texts = Vec::new();
    for part in slides {
        let xml = read_part(&mut package, &part)?;
        texts.extend(shape_texts(&xml)?.into_iter().filter(|t| !t.trim().is_empty()));
    }

    Ok(texts.join("\n"))
}

/// Slide part names in presentation order.
fn slide_parts(package: &mut Package<'_>) -> ExtractResult<Vec<String>> {
    let presentation = read_part(package, PRESENTATION_PART)?;
    let rels = read_part(package, PRESENTATION_RELS)?;

    let targets = relationship_targets(&rels)?;
    slide_ids(&presentation)?
        .into_iter()
        .map(|id| {
            targets
                .get(&id)
                .map(|target| resolve_target(target))
                .ok_or_else(|| ExtractError::MissingPart(format!("slide relationship {}", id)))
        })
        .collect()
}

/// Relationship ids of `p:sldId` entries, in list order.
fn slide_ids(xml: &[u8]) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut ids = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                if let Some(id) = relationship_id(&e)? {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(ids)
}

/// The namespaced `r:id` attribute (the bare `id` is the slide number).
fn relationship_id(element: &BytesStart<'_>) -> ExtractResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == b"id" && attr.key.prefix().is_some() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn relationship_targets(xml: &[u8]) -> ExtractResult<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(quick_xml::Error::from)?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

/// Relationship targets are relative to `ppt/` unless absolute.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Text of each top-level shape that has a text body, paragraphs joined by newline.
fn shape_texts(xml: &[u8]) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut shapes = Vec::new();
    // Paragraphs of the current shape; `None` until a text body is seen.
    let mut paragraphs: Option<Vec<String>> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(e.local_name().as_ref().to_vec());
                if path_is(&stack, TEXT_BODY) {
                    paragraphs = Some(Vec::new());
                } else if path_is(&stack, PARAGRAPH) {
                    if let Some(paragraphs) = paragraphs.as_mut() {
                        paragraphs.push(String::new());
                    }
                }
            }
            Event::End(_) => {
                if path_is(&stack, SHAPE) {
                    shapes.extend(paragraphs.take().map(|p| p.join("\n")));
                }
                stack.pop();
            }
            Event::Empty(e) => {
                if let Some(paragraphs) = paragraphs.as_mut() {
                    let name = e.local_name();
                    if path_is(&stack, TEXT_BODY) && name.as_ref() == b"p" {
                        paragraphs.push(String::new());
                    } else if path_is(&stack, PARAGRAPH) && name.as_ref() == b"br" {
                        // Soft line break inside a paragraph.
                        if let Some(current) = paragraphs.last_mut() {
                            current.push('\u{b}');
                        }
                    }
                }
            }
            Event::Text(t) => {
                if path_is(&stack, RUN_TEXT) || path_is(&stack, FIELD_TEXT) {
                    if let Some(current) = paragraphs.as_mut().and_then(|p| p.last_mut()) {
                        current.push_str(&t.unescape()?);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(shapes)
}
