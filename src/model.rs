use crate::formats::infer_extension;

/// Everything the metadata source reports about one video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoMetadata {
    /// Identifier supplied by the caller, never read from the response
    pub id: String,
    pub title: String,
    pub author: String,
    /// Free-text keyword string, as sent by the source
    pub keywords: String,
    pub thumbnail_url: String,
    pub view_count: i64,
    pub avg_rating: f32,
    pub length_seconds: i64,
    /// Available encodings in source order; indices select a download
    pub formats: Vec<EncodingDescriptor>,
}

/// One alternative format a video can be downloaded in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingDescriptor {
    /// Opaque format identifier, not unique
    pub itag: i32,
    /// MIME-like type, possibly with a codec list
    pub video_type: String,
    pub quality: String,
    /// Download URL with the `signature` parameter already appended
    pub url: String,
}

impl EncodingDescriptor {
    pub fn extension(&self) -> &'static str {
        infer_extension(&self.video_type)
    }
}

impl VideoMetadata {
    pub fn format(&self, index: usize) -> Option<&EncodingDescriptor> {
        self.formats.get(index)
    }

    /// File extension for the encoding at `index`.
    pub fn extension(&self, index: usize) -> Option<&'static str> {
        self.format(index).map(EncodingDescriptor::extension)
    }
}
