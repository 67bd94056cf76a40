/// Text decoding for tag payloads.
///
/// ID3 predates Unicode; single-byte text in the wild is commonly
/// Windows-1251 (Cyrillic) rather than the Latin-1 the standard names,
/// so encoding byte 0 deliberately decodes as Windows-1251.
use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1251};
use tracing::warn;

/// ID3v2 text-frame encoding selectors
const ENCODING_SINGLE_BYTE: u8 = 0;
const ENCODING_UTF16_BOM: u8 = 1;
const ENCODING_UTF16_BE: u8 = 2;
const ENCODING_UTF8: u8 = 3;

/// Strip trailing NUL and ASCII space padding from a fixed-width field.
pub(crate) fn trim_trailing_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0x00 && b != 0x20)
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Decode a Windows-1251 byte field into a `String`.
pub(crate) fn decode_windows1251(bytes: &[u8]) -> String {
    let (text, _, had_errors) = WINDOWS_1251.decode(bytes);
    if had_errors {
        warn!("windows-1251 decode replaced invalid bytes");
    }
    text.into_owned()
}

/// Decode raw bytes as Latin-1 (every byte maps to its code point).
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode an ID3v2 text-frame payload.
///
/// The first byte selects the encoding; unknown selectors fall back to
/// Latin-1. Conversion never fails outright: invalid sequences are
/// replaced and logged so a garbled title does not lose the whole parse.
/// Returns `None` for an empty payload or an empty decoded string.
pub(crate) fn decode_text_frame(payload: &[u8]) -> Option<String> {
    let (&encoding, data) = payload.split_first()?;

    let decoded = match encoding {
        ENCODING_SINGLE_BYTE => decode_windows1251(data),
        ENCODING_UTF16_BOM => {
            // decode() honors a leading BOM and assumes LE without one
            let (text, _, had_errors) = UTF_16LE.decode(data);
            if had_errors {
                warn!("utf-16 decode replaced invalid code units");
            }
            text.into_owned()
        }
        ENCODING_UTF16_BE => {
            let (text, had_errors) = UTF_16BE.decode_without_bom_handling(data);
            if had_errors {
                warn!("utf-16be decode replaced invalid code units");
            }
            text.into_owned()
        }
        ENCODING_UTF8 => String::from_utf8_lossy(data).into_owned(),
        other => {
            warn!(encoding = other, "unknown text encoding, assuming latin-1");
            decode_latin1(data)
        }
    };

    let trimmed = decoded.trim_end_matches(['\0', ' ']);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_nul_and_space() {
        assert_eq!(trim_trailing_padding(b"Song Title \0\0 "), b"Song Title");
        assert_eq!(trim_trailing_padding(b"\0\0\0"), b"");
        assert_eq!(trim_trailing_padding(b""), b"");
    }

    #[test]
    fn keeps_interior_spaces() {
        assert_eq!(trim_trailing_padding(b"A B\0"), b"A B");
    }

    #[test]
    fn decodes_cyrillic_windows1251() {
        // "Кино" in Windows-1251
        let bytes = [0xCA, 0xE8, 0xED, 0xEE];
        assert_eq!(decode_windows1251(&bytes), "Кино");
    }

    #[test]
    fn text_frame_single_byte_encoding() {
        let mut payload = vec![0u8];
        payload.extend_from_slice(b"Hello\0");
        assert_eq!(decode_text_frame(&payload).as_deref(), Some("Hello"));
    }

    #[test]
    fn text_frame_utf16_with_le_bom() {
        let mut payload = vec![1u8, 0xFF, 0xFE];
        for unit in "Hi".encode_utf16() {
            payload.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text_frame(&payload).as_deref(), Some("Hi"));
    }

    #[test]
    fn text_frame_utf16_with_be_bom() {
        let mut payload = vec![1u8, 0xFE, 0xFF];
        for unit in "Hi".encode_utf16() {
            payload.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text_frame(&payload).as_deref(), Some("Hi"));
    }

    #[test]
    fn text_frame_utf16be_without_bom() {
        let mut payload = vec![2u8];
        for unit in "Тест".encode_utf16() {
            payload.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text_frame(&payload).as_deref(), Some("Тест"));
    }

    #[test]
    fn text_frame_utf8() {
        let mut payload = vec![3u8];
        payload.extend_from_slice("Тест".as_bytes());
        assert_eq!(decode_text_frame(&payload).as_deref(), Some("Тест"));
    }

    #[test]
    fn text_frame_unknown_encoding_falls_back_to_latin1() {
        let payload = [9u8, 0xE9];
        assert_eq!(decode_text_frame(&payload).as_deref(), Some("é"));
    }

    #[test]
    fn empty_or_padding_only_payload_is_none() {
        assert_eq!(decode_text_frame(&[]), None);
        assert_eq!(decode_text_frame(&[0u8]), None);
        assert_eq!(decode_text_frame(&[0u8, 0x20, 0x00]), None);
    }
}
