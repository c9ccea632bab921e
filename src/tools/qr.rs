//! QR code render URLs.
//!
//! Rendering is delegated to a third-party image endpoint; this tool only
//! builds the URL the `<img>` tag points at.

/// Build the render URL for `data` at `size`x`size` pixels.
pub fn render_url(endpoint: &str, data: &str, size: u32) -> String {
    format!(
        "{}?size={}x{}&data={}",
        endpoint.trim_end_matches('?'),
        size,
        size,
        urlencoding::encode(data)
    )
}
