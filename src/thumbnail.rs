use eframe::egui::ColorImage;
use tracing::debug;

/// Downloads and decodes the thumbnail a video's metadata points at.
pub fn fetch_thumbnail(thumbnail_url: &str) -> Option<ColorImage> {
    if thumbnail_url.is_empty() {
        return None;
    }
    // Any network or decode failure just leaves the video without a picture
    let resp = match reqwest::blocking::get(thumbnail_url).and_then(|r| r.error_for_status()) {
        Ok(resp) => resp.bytes().ok()?,
        Err(e) => {
            debug!(url = thumbnail_url, error = %e, "thumbnail fetch failed");
            return None;
        }
    };
    let img = image::load_from_memory(&resp).ok()?.to_rgba8();
    let size = [img.width() as usize, img.height() as usize];
    Some(ColorImage::from_rgba_unmultiplied(size, &img))
}
