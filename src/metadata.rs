use tracing::debug;

use crate::error::{Error, Result};
use crate::formats::parse_format_list;
use crate::model::VideoMetadata;
use crate::params::EncodedParams;

/// Builds [`VideoMetadata`] from a raw metadata response body.
///
/// Fails only with [`Error::UnavailableVideo`], when the body carries a
/// non-empty `errorcode` or `status=fail`. Absent or unparseable fields fall
/// back to empty strings and zeros.
pub fn parse_metadata(video_id: &str, body: &str) -> Result<VideoMetadata> {
    let params = EncodedParams::parse(body);

    let errorcode = params.get_or_empty("errorcode");
    if !errorcode.is_empty() || params.get("status") == Some("fail") {
        let reason = params.get_or_empty("reason");
        debug!(video_id, errorcode, reason, "metadata source rejected video");
        return Err(Error::UnavailableVideo(reason.to_string()));
    }

    let formats = parse_format_list(params.get_or_empty("url_encoded_fmt_stream_map"));

    let video = VideoMetadata {
        id: video_id.to_string(),
        title: params.get_or_empty("title").to_string(),
        author: params.get_or_empty("author").to_string(),
        keywords: params.get_or_empty("keywords").to_string(),
        thumbnail_url: params.get_or_empty("thumbnail_url").to_string(),
        view_count: params.parse_or("view_count", 0),
        avg_rating: params.parse_or("avg_rating", 0.0),
        length_seconds: params.parse_or("length_seconds", 0),
        formats,
    };

    debug!(
        video_id,
        title = %video.title,
        formats = video.formats.len(),
        "decoded video metadata"
    );

    Ok(video)
}
