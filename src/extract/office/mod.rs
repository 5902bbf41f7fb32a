//! Office Open XML documents (DOCX, XLSX, PPTX).
//!
//! Spreadsheets go through `calamine`. Word and PowerPoint packages are read
//! directly with `zip` + `quick-xml`, walking only the parts that carry text.

pub mod docx;
pub mod pptx;
pub mod xlsx;

use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::{ExtractError, ExtractResult};

pub(crate) type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

pub(crate) fn open_package(bytes: &[u8]) -> ExtractResult<Package<'_>> {
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Read a whole part out of the package.
pub(crate) fn read_part(package: &mut Package<'_>, name: &str) -> ExtractResult<Vec<u8>> {
    let mut entry = match package.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractError::MissingPart(name.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let mut out = Vec::new();
    entry.read_to_end(&mut out)?;
    Ok(out)
}

/// True when the open-element stack is exactly `expected` (local names).
pub(crate) fn path_is(stack: &[Vec<u8>], expected: &[&[u8]]) -> bool {
    stack.len() == expected.len()
        && stack
            .iter()
            .zip(expected)
            .all(|(open, want)| open.as_slice() == *want)
}
