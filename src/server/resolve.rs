use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Map a request path onto the document root. `/` resolves to the index
/// document; anything that is not a plain relative path (parent dirs,
/// absolute prefixes) is rejected so a request can never escape the root.
pub fn resolve(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(uri_path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .ok()?;

    let trimmed = decoded.trim_start_matches('/');
    let relative = if trimmed.is_empty() {
        "index.html"
    } else {
        trimmed
    };

    let mut target = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }

    Some(target)
}
