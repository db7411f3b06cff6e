use crate::config::{FALLBACK_EXTENSION, VIDEO_FORMATS};
use crate::model::EncodingDescriptor;
use crate::params::EncodedParams;

/// Decodes a comma-joined list of encoded-parameter records.
///
/// Commas are never escaped upstream, so a record cannot contain one. Empty
/// input yields no encodings; every other piece, blank or not, is one
/// encoding so indices line up with the source list.
pub fn parse_format_list(input: &str) -> Vec<EncodingDescriptor> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(',').map(parse_format).collect()
}

fn parse_format(record: &str) -> EncodingDescriptor {
    let params = EncodedParams::parse(record);

    // An absent `sig` still produces an (empty) signature parameter.
    let url = format!(
        "{}&signature={}",
        params.get_or_empty("url"),
        params.get_or_empty("sig")
    );

    EncodingDescriptor {
        itag: params.parse_or("itag", 0),
        video_type: params.get_or_empty("type").to_string(),
        quality: params.get_or_empty("quality").to_string(),
        url,
    }
}

/// Picks a file extension for a type string such as `video/webm; codecs=vp9`.
pub fn infer_extension(video_type: &str) -> &'static str {
    VIDEO_FORMATS
        .iter()
        .copied()
        .find(|ext| video_type.contains(ext))
        .unwrap_or(FALLBACK_EXTENSION)
}
