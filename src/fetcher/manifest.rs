use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One cover image to fetch: where it lands on disk and where it comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    pub filename: String,
    pub url: String,
}

/// Album cover sources, mostly Wikipedia uploads
const BUILTIN_COVERS: &[(&str, &str)] = &[
    (
        "college-dropout.jpg",
        "https://upload.wikimedia.org/wikipedia/en/a/a3/Kanyewest_collegedropout.jpg",
    ),
    (
        "late-registration.jpg",
        "https://upload.wikimedia.org/wikipedia/en/f/f4/Late_registration_cd_cover.jpg",
    ),
    (
        "graduation.jpg",
        "https://upload.wikimedia.org/wikipedia/en/7/70/Graduation_%28album%29.jpg",
    ),
    (
        "808s-heartbreak.jpg",
        "https://upload.wikimedia.org/wikipedia/en/3/30/808s_%2526_Heartbreak.png",
    ),
    (
        "mbdtf.jpg",
        "https://upload.wikimedia.org/wikipedia/en/f/f0/My_Beautiful_Dark_Twisted_Fantasy.jpg",
    ),
    (
        "watch-the-throne.jpg",
        "https://upload.wikimedia.org/wikipedia/en/e/ee/Watch_the_Throne.jpeg",
    ),
    (
        "yeezus.jpg",
        "https://upload.wikimedia.org/wikipedia/en/0/03/Yeezus_album_cover.png",
    ),
    (
        "life-of-pablo.jpg",
        "https://upload.wikimedia.org/wikipedia/en/4/4d/The_life_of_pablo_alternate.jpg",
    ),
    (
        "ye.jpg",
        "https://upload.wikimedia.org/wikipedia/en/7/74/Ye_album_cover.jpg",
    ),
    (
        "kids-see-ghosts.jpg",
        "https://upload.wikimedia.org/wikipedia/en/0/0a/Kids_See_Ghost_Cover.jpg",
    ),
    (
        "jesus-is-king.jpg",
        "https://upload.wikimedia.org/wikipedia/en/a/a2/Kanye_West_-_Jesus_Is_King.png",
    ),
    (
        "donda.jpg",
        "https://upload.wikimedia.org/wikipedia/en/4/4a/Kanye_West_-_Donda.png",
    ),
    (
        "donda-2.jpg",
        "https://upload.wikimedia.org/wikipedia/en/8/8f/Kanye_West_-_Donda_2_Cover.jpg",
    ),
    (
        "vultures-1.jpg",
        "https://upload.wikimedia.org/wikipedia/en/c/cf/Vultures_1_album_cover.jpg",
    ),
    (
        "vultures-2.jpg",
        "https://upload.wikimedia.org/wikipedia/en/e/e2/Kanye_West_and_Ty_Dolla_Sign_-_Vultures_2.png",
    ),
];

/// The built-in cover set the front-end expects under assets/album-covers
pub fn builtin_covers() -> Vec<AssetEntry> {
    BUILTIN_COVERS
        .iter()
        .map(|(filename, url)| AssetEntry {
            filename: filename.to_string(),
            url: url.to_string(),
        })
        .collect()
}

/// Load a JSON array of entries from disk. Filenames must be unique.
pub fn load_manifest(
    path: &Path,
) -> Result<Vec<AssetEntry>, Box<dyn std::error::Error + Send + Sync>> {
    let data = std::fs::read_to_string(path)?;
    let entries: Vec<AssetEntry> = serde_json::from_str(&data)?;

    let mut seen = HashSet::new();
    for entry in entries.iter() {
        if !seen.insert(entry.filename.as_str()) {
            return Err(format!("duplicate filename in manifest: {}", entry.filename).into());
        }
    }

    Ok(entries)
}
