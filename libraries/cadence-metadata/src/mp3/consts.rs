//! Static lookup tables: ID3v1 genre names and MPEG frame tables.

use super::frame::{Layer, MpegVersion};

/// ID3v1 genre names, indexed 0..=147 (the original 80 plus Winamp extensions).
pub(crate) static GENRES: [&str; 148] = [
    "Blues", "Classic Rock", "Country", "Dance",
    "Disco", "Funk", "Grunge", "Hip-Hop",
    "Jazz", "Metal", "New Age", "Oldies",
    "Other", "Pop", "R&B", "Rap",
    "Reggae", "Rock", "Techno", "Industrial",
    "Alternative", "Ska", "Death Metal", "Pranks",
    "Soundtrack", "Euro-Techno", "Ambient", "Trip-Hop",
    "Vocal", "Jazz+Funk", "Fusion", "Trance",
    "Classical", "Instrumental", "Acid", "House",
    "Game", "Sound Clip", "Gospel", "Noise",
    "AlternRock", "Bass", "Soul", "Punk",
    "Space", "Meditative", "Instrumental Pop", "Instrumental Rock",
    "Ethnic", "Gothic", "Darkwave", "Techno-Industrial",
    "Electronic", "Pop-Folk", "Eurodance", "Dream",
    "Southern Rock", "Comedy", "Cult", "Gangsta",
    "Top 40", "Christian Rap", "Pop/Funk", "Jungle",
    "Native American", "Cabaret", "New Wave", "Psychadelic",
    "Rave", "Showtunes", "Trailer", "Lo-Fi",
    "Tribal", "Acid Punk", "Acid Jazz", "Polka",
    "Retro", "Musical", "Rock & Roll", "Hard Rock",
    "Folk", "Folk-Rock", "National Folk", "Swing",
    "Fast Fusion", "Bebob", "Latin", "Revival",
    "Celtic", "Bluegrass", "Avantgarde", "Gothic Rock",
    "Progressive Rock", "Psychedelic Rock", "Symphonic Rock", "Slow Rock",
    "Big Band", "Chorus", "Easy Listening", "Acoustic",
    "Humour", "Speech", "Chanson", "Opera",
    "Chamber Music", "Sonata", "Symphony", "Booty Bass",
    "Primus", "Porn Groove", "Satire", "Slow Jam",
    "Club", "Tango", "Samba", "Folklore",
    "Ballad", "Power Ballad", "Rhytmic Soul", "Freestyle",
    "Duet", "Punk Rock", "Drum Solo", "Acapella",
    "Euro-House", "Dance Hall", "Goa", "Drum & Bass",
    "Club-House", "Hardcore", "Terror", "Indie",
    "BritPop", "Negerpunk", "Polsk Punk", "Beat",
    "Christian Gangsta Rap", "Heavy Metal", "Black Metal", "Crossover",
    "Contemporary Christian", "Christian Rock", "Merengue", "Salsa",
    "Thrash Metal", "Anime", "Jpop", "Synthpop",
];

/// Look up a genre name by its ID3v1 index.
pub(crate) fn genre_name(index: usize) -> Option<&'static str> {
    GENRES.get(index).copied()
}

const MPEG1_LAYER1: [u32; 15] = [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448];
const MPEG1_LAYER2: [u32; 15] = [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384];
const MPEG1_LAYER3: [u32; 15] = [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320];
const MPEG2_LAYER1: [u32; 15] = [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256];
const MPEG2_LAYER2_3: [u32; 15] = [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160];

/// Bitrate in kbit/s for a (version, layer, index) triple.
///
/// MPEG 2 and 2.5 share one table. Returns 0 for reserved combinations,
/// which the frame parser rejects as an invalid bitrate.
pub(crate) fn bitrate_kbps(version: MpegVersion, layer: Layer, index: usize) -> u32 {
    let table = match (version, layer) {
        (MpegVersion::Mpeg1, Layer::Layer1) => &MPEG1_LAYER1,
        (MpegVersion::Mpeg1, Layer::Layer2) => &MPEG1_LAYER2,
        (MpegVersion::Mpeg1, Layer::Layer3) => &MPEG1_LAYER3,
        (MpegVersion::Mpeg2 | MpegVersion::Mpeg25, Layer::Layer1) => &MPEG2_LAYER1,
        (MpegVersion::Mpeg2 | MpegVersion::Mpeg25, Layer::Layer2 | Layer::Layer3) => {
            &MPEG2_LAYER2_3
        }
        _ => return 0,
    };
    table[index]
}

/// Sample rate in Hz for a (version, index) pair. Index 3 is reserved.
pub(crate) fn sample_rate_hz(version: MpegVersion, index: usize) -> u32 {
    match version {
        MpegVersion::Mpeg1 => [44_100, 48_000, 32_000][index],
        MpegVersion::Mpeg2 => [22_050, 24_000, 16_000][index],
        MpegVersion::Mpeg25 => [11_025, 12_000, 8_000][index],
        MpegVersion::Reserved => 0,
    }
}

/// Samples carried by one frame for a (version, layer) pair.
pub(crate) fn samples_per_frame(version: MpegVersion, layer: Layer) -> u32 {
    match (version, layer) {
        (MpegVersion::Mpeg1, Layer::Layer1) => 384,
        (MpegVersion::Mpeg1, Layer::Layer2 | Layer::Layer3) => 1152,
        (MpegVersion::Mpeg2 | MpegVersion::Mpeg25, Layer::Layer1) => 384,
        (MpegVersion::Mpeg2 | MpegVersion::Mpeg25, Layer::Layer2) => 1152,
        (MpegVersion::Mpeg2 | MpegVersion::Mpeg25, Layer::Layer3) => 576,
        _ => 0,
    }
}

/// Padding slot size in bytes: 4 for layer 1, 1 for layers 2/3.
pub(crate) fn slot_size(layer: Layer) -> u32 {
    match layer {
        Layer::Layer1 => 4,
        Layer::Layer2 | Layer::Layer3 => 1,
        Layer::Reserved => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_table_boundaries() {
        assert_eq!(genre_name(0), Some("Blues"));
        assert_eq!(genre_name(17), Some("Rock"));
        assert_eq!(genre_name(147), Some("Synthpop"));
        assert_eq!(genre_name(148), None);
    }

    #[test]
    fn mpeg2_and_mpeg25_share_bitrate_tables() {
        for index in 0..15 {
            assert_eq!(
                bitrate_kbps(MpegVersion::Mpeg2, Layer::Layer3, index),
                bitrate_kbps(MpegVersion::Mpeg25, Layer::Layer3, index),
            );
        }
    }

    #[test]
    fn reserved_combinations_yield_zero_bitrate() {
        assert_eq!(bitrate_kbps(MpegVersion::Reserved, Layer::Layer3, 9), 0);
        assert_eq!(bitrate_kbps(MpegVersion::Mpeg1, Layer::Reserved, 9), 0);
    }

    #[test]
    fn known_table_values() {
        assert_eq!(bitrate_kbps(MpegVersion::Mpeg1, Layer::Layer3, 9), 128);
        assert_eq!(bitrate_kbps(MpegVersion::Mpeg1, Layer::Layer1, 14), 448);
        assert_eq!(sample_rate_hz(MpegVersion::Mpeg1, 0), 44_100);
        assert_eq!(sample_rate_hz(MpegVersion::Mpeg25, 2), 8_000);
        assert_eq!(samples_per_frame(MpegVersion::Mpeg2, Layer::Layer3), 576);
    }
}
