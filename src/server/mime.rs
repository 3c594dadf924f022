use std::path::Path;

pub const HTML: &str = "text/html; charset=utf-8";
pub const CSS: &str = "text/css; charset=utf-8";
pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
pub const JSON: &str = "application/json";
pub const PLAIN: &str = "text/plain; charset=utf-8";
pub const PNG: &str = "image/png";
pub const JPEG: &str = "image/jpeg";
pub const GIF: &str = "image/gif";
pub const WEBP: &str = "image/webp";
pub const SVG: &str = "image/svg+xml";
pub const ICO: &str = "image/x-icon";
pub const MP3: &str = "audio/mpeg";
pub const MP4: &str = "video/mp4";
pub const WOFF2: &str = "font/woff2";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess the Content-Type from a file extension
pub fn from_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => HTML,
        Some("css") => CSS,
        Some("js" | "mjs") => JAVASCRIPT,
        Some("json") => JSON,
        Some("txt" | "md") => PLAIN,
        Some("png") => PNG,
        Some("jpg" | "jpeg") => JPEG,
        Some("gif") => GIF,
        Some("webp") => WEBP,
        Some("svg") => SVG,
        Some("ico") => ICO,
        Some("mp3") => MP3,
        Some("mp4") => MP4,
        Some("woff2") => WOFF2,
        _ => OCTET_STREAM,
    }
}
