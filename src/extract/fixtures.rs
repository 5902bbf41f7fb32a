//! In-memory documents and fake OCR collaborators for tests.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::ocr::{OcrEngine, OcrError, PageRasterizer};

/// OCR engine that returns a canned answer and counts calls.
pub struct FakeOcr {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_input: Mutex<Option<Vec<u8>>>,
}

impl FakeOcr {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<Vec<u8>> {
        self.last_input.lock().unwrap().clone()
    }
}

impl OcrEngine for FakeOcr {
    fn recognize(&self, png: &[u8]) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(png.to_vec());
        self.reply.clone().map_err(OcrError::Failed)
    }
}

/// Rasterizer that records which pages were requested.
#[derive(Default)]
pub struct FakeRasterizer {
    requested: Mutex<Vec<(u32, u32)>>,
}

impl FakeRasterizer {
    pub fn pages(&self) -> Vec<(u32, u32)> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageRasterizer for FakeRasterizer {
    fn rasterize(&self, _pdf: &[u8], page: u32, dpi: u32) -> Result<Vec<u8>, OcrError> {
        self.requested.lock().unwrap().push((page, dpi));
        Ok(format!("raster of page {}", page).into_bytes())
    }
}

/// A PDF with one page per entry: `Some(text)` draws a text layer, `None`
/// leaves the page blank like a scan without embedded text.
pub fn pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = match page {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// A small RGB PNG.
pub fn png() -> Vec<u8> {
    let image = ::image::RgbImage::from_pixel(4, 4, ::image::Rgb([255, 255, 255]));
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), ::image::ImageFormat::Png)
        .unwrap();
    out
}

/// A zip archive with the given `(name, contents)` parts.
pub fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, contents) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

const W_NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

/// A DOCX whose body is the given raw WordprocessingML.
pub fn docx_with_body(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document {}><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    );
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", document.as_str()),
    ])
}

/// A DOCX with one single-run paragraph per entry.
pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, p))
        .collect();
    docx_with_body(&body)
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/></Types>"#;

const SHEET_NS: &str = r#"xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

/// Two sheets with gaps, a formula with a cached value, booleans, a blank
/// shared string and a zero. Non-empty values in order:
/// `Name, 42, 3, True, tail` then `2.5, last`.
pub fn xlsx_two_sheets() -> Vec<u8> {
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook {}><sheets><sheet name="People" sheetId="1" r:id="rId1"/><sheet name="Extra" sheetId="2" r:id="rId2"/></sheets></workbook>"#,
        SHEET_NS
    );
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/></Relationships>"#;
    let shared = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst {} count="4" uniqueCount="4"><si><t>Name</t></si><si><t></t></si><si><t>tail</t></si><si><t>last</t></si></sst>"#,
        SHEET_NS
    );
    let sheet1 = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet {}><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1"><v>42</v></c><c r="D1"><f>SUM(1,2)</f><v>3</v></c></row><row r="2"><c r="A2" t="s"><v>1</v></c><c r="B2"><v>0</v></c><c r="C2" t="b"><v>1</v></c></row><row r="4"><c r="B4" t="s"><v>2</v></c></row></sheetData></worksheet>"#,
        SHEET_NS
    );
    let sheet2 = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet {}><sheetData><row r="1"><c r="A1"><v>2.5</v></c></row><row r="2"><c r="B2" t="b"><v>0</v></c></row><row r="3"><c r="C3" t="s"><v>3</v></c></row></sheetData></worksheet>"#,
        SHEET_NS
    );

    package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels),
        ("xl/sharedStrings.xml", shared.as_str()),
        ("xl/worksheets/sheet1.xml", sheet1.as_str()),
        ("xl/worksheets/sheet2.xml", sheet2.as_str()),
    ])
}

const P_NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

/// A PPTX with one text shape per string on each slide, plus a picture
/// between shapes. Slides are listed in the given order but stored under
/// reversed part names so ordering must come from the slide list.
pub fn pptx(slides: &[&[&str]]) -> Vec<u8> {
    let count = slides.len();
    let mut slide_ids = String::new();
    let mut rels = String::new();
    let mut parts: Vec<(String, String)> = Vec::new();

    for (index, shapes) in slides.iter().enumerate() {
        let file_number = count - index;
        let rel_id = format!("rId{}", index + 10);
        slide_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + index, rel_id));
        rels.push_str(&format!(
            r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            rel_id, file_number
        ));

        let shape_xml: String = shapes
            .iter()
            .map(|text| {
                format!(
                    r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Text"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp><p:pic><p:nvPicPr><p:cNvPr id="9" name="Picture"/></p:nvPicPr></p:pic>"#,
                    text
                )
            })
            .collect();
        parts.push((
            format!("ppt/slides/slide{}.xml", file_number),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
                P_NS, shape_xml
            ),
        ));
    }

    let presentation = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {}><p:sldIdLst>{}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#,
        P_NS, slide_ids
    );
    let presentation_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        rels
    );

    let mut all: Vec<(&str, &str)> = vec![
        ("[Content_Types].xml", CONTENT_TYPES),
        ("ppt/presentation.xml", presentation.as_str()),
        ("ppt/_rels/presentation.xml.rels", presentation_rels.as_str()),
    ];
    all.extend(parts.iter().map(|(name, xml)| (name.as_str(), xml.as_str())));
    package(&all)
}
