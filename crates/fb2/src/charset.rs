//! Character decoding of document files.
//!
//! FB2 files in the wild are as often `windows-1251` as UTF-8, announced by
//! the XML declaration. A byte order mark wins over the declaration, and a
//! document with neither is UTF-8.

use crate::error::{ErrorKind, Result};
use encoding_rs::{Encoding, UTF_8};
use exn::OptionExt;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::borrow::Cow;
use tracing::debug;

/// Decode the raw bytes of a document file.
///
/// Bytes that are invalid in the chosen encoding are an error, never replaced.
pub(crate) fn decode(bytes: &[u8]) -> Result<String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
        None => (declared(bytes)?.unwrap_or(UTF_8), bytes),
    };
    debug!(encoding = encoding.name(), "decoding document");
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_raise(|| ErrorKind::Decode(encoding.name()))
}

/// The encoding named by the XML declaration, if there is one.
fn declared(bytes: &[u8]) -> Result<Option<&'static Encoding>> {
    let mut reader = Reader::from_reader(bytes);
    let Ok(Event::Decl(declaration)) = reader.read_event() else {
        return Ok(None);
    };
    let Some(Ok(label)) = declaration.encoding() else {
        return Ok(None);
    };
    let encoding = Encoding::for_label(&label)
        .ok_or_raise(|| ErrorKind::UnsupportedEncoding(String::from_utf8_lossy(&label).into_owned()))?;
    // A declaration that was readable as ASCII rules out UTF-16.
    Ok(Some(encoding.output_encoding()))
}
