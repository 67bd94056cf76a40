//! Vorbis comment decoding: a length-prefixed `KEY=value` list shared by
//! FLAC and Ogg Vorbis.

use cadence_core::AudioMetadata;
use tracing::debug;

/// Apply `TITLE`/`ARTIST`/`GENRE` entries from a comment payload to the
/// metadata record. Keys match case-sensitively; values are UTF-8 with
/// surrounding whitespace trimmed. A truncated or malformed payload stops
/// decoding without failing the parse.
pub(crate) fn apply_comments(payload: &[u8], metadata: &mut AudioMetadata) {
    let Some(vendor_len) = read_u32_le(payload, 0) else {
        debug!("vorbis comment payload too short for vendor length");
        return;
    };
    let mut pos = 4 + vendor_len as usize;

    let Some(count) = read_u32_le(payload, pos) else {
        debug!("vorbis comment payload too short for comment count");
        return;
    };
    pos += 4;

    for _ in 0..count {
        let Some(length) = read_u32_le(payload, pos) else {
            debug!("vorbis comment list ends before its declared count");
            return;
        };
        pos += 4;
        let Some(entry) = payload.get(pos..pos + length as usize) else {
            debug!("vorbis comment entry longer than remaining payload");
            return;
        };
        pos += length as usize;

        let Some(eq) = entry.iter().position(|&b| b == b'=') else {
            continue;
        };
        let value = || {
            String::from_utf8_lossy(&entry[eq + 1..])
                .trim()
                .to_string()
        };
        match &entry[..eq] {
            b"TITLE" => metadata.title = value(),
            b"ARTIST" => metadata.artist = value(),
            b"GENRE" => metadata.genre = value(),
            _ => {}
        }
    }
}

fn read_u32_le(data: &[u8], pos: usize) -> Option<u32> {
    let bytes = data.get(pos..pos + 4)?;
    Some(u32::from_le_bytes(bytes.try_into().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_payload(vendor: &[u8], comments: &[&str]) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
        payload.extend_from_slice(vendor);
        payload.extend_from_slice(&(comments.len() as u32).to_le_bytes());
        for comment in comments {
            payload.extend_from_slice(&(comment.len() as u32).to_le_bytes());
            payload.extend_from_slice(comment.as_bytes());
        }
        payload
    }

    #[test]
    fn extracts_known_keys_and_ignores_the_rest() {
        let payload = build_payload(b"", &["TITLE=Foo", "ARTIST=Bar", "YEAR=2000"]);
        let mut metadata = AudioMetadata::new();
        apply_comments(&payload, &mut metadata);
        assert_eq!(metadata.title, "Foo");
        assert_eq!(metadata.artist, "Bar");
        assert_eq!(metadata.genre, "");
    }

    #[test]
    fn skips_vendor_string() {
        let payload = build_payload(b"reference libFLAC 1.3.2", &["GENRE= Jazz "]);
        let mut metadata = AudioMetadata::new();
        apply_comments(&payload, &mut metadata);
        assert_eq!(metadata.genre, "Jazz");
    }

    #[test]
    fn keys_are_case_sensitive() {
        let payload = build_payload(b"", &["title=Foo", "Artist=Bar"]);
        let mut metadata = AudioMetadata::new();
        apply_comments(&payload, &mut metadata);
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.artist, "");
    }

    #[test]
    fn entry_without_separator_is_skipped() {
        let payload = build_payload(b"", &["NOSEPARATOR", "TITLE=Kept"]);
        let mut metadata = AudioMetadata::new();
        apply_comments(&payload, &mut metadata);
        assert_eq!(metadata.title, "Kept");
    }

    #[test]
    fn truncated_payload_keeps_earlier_entries() {
        let mut payload = build_payload(b"", &["TITLE=Foo"]);
        // claim a second comment that is not there
        payload[4..8].copy_from_slice(&2u32.to_le_bytes());
        let mut metadata = AudioMetadata::new();
        apply_comments(&payload, &mut metadata);
        assert_eq!(metadata.title, "Foo");
    }

    #[test]
    fn empty_payload_is_harmless() {
        let mut metadata = AudioMetadata::new();
        apply_comments(&[], &mut metadata);
        assert_eq!(metadata, AudioMetadata::new());
    }
}
