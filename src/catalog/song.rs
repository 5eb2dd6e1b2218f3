use serde::{Deserialize, Serialize};

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub link: String,
    /// Mood label this song is tagged with.
    pub mood: String,
    /// Chart position within its mood; 0 = unranked.
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub language: String,
}

impl Song {
    pub fn is_ranked(&self) -> bool {
        self.rank > 0
    }

    /// Video id when `link` points at YouTube.
    pub fn youtube_id(&self) -> Option<&str> {
        const MARKERS: &[&str] = &["watch?v=", "&v=", "youtu.be/", "/shorts/", "/embed/"];

        if !is_youtube_host(&self.link) {
            return None;
        }
        let rest = MARKERS
            .iter()
            .find_map(|marker| self.link.find(marker).map(|i| &self.link[i + marker.len()..]))?;
        let end = rest.find(['&', '?', '/', '#']).unwrap_or(rest.len());
        let id = &rest[..end];

        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then_some(id)
    }

    /// High-quality YouTube thumbnail for this song, if it has one.
    pub fn thumbnail_url(&self) -> Option<String> {
        self.youtube_id()
            .map(|id| format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id))
    }
}

/// `youtube.com`, any of its subdomains, or `youtu.be`.
fn is_youtube_host(link: &str) -> bool {
    let rest = link.split_once("://").map_or(link, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host).to_ascii_lowercase();
    host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtu.be"
}
