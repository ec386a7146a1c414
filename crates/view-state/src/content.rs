use shared_types::ContentItem;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Which video the course page is playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentPlayer {
    active: Option<i64>,
}

impl ContentPlayer {
    pub fn active(&self) -> Option<i64> {
        self.active
    }

    /// Called with each freshly loaded content list. Keeps the current video
    /// if it still exists, otherwise picks the first video.
    pub fn load(&mut self, items: &[ContentItem]) {
        let still_there = self
            .active
            .is_some_and(|id| items.iter().any(|c| c.is_video() && c.content_id == id));
        if !still_there {
            self.active = first_video(items);
        }
    }

    pub fn select(&mut self, content_id: i64) {
        self.active = Some(content_id);
    }

    /// The active item, if it is still in `items`.
    pub fn active_item<'a>(&self, items: &'a [ContentItem]) -> Option<&'a ContentItem> {
        let id = self.active?;
        items.iter().find(|c| c.content_id == id)
    }
}

fn first_video(items: &[ContentItem]) -> Option<i64> {
    items.iter().find(|c| c.is_video()).map(|c| c.content_id)
}

/// Embeddable player URL for a YouTube watch or short link.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    let rest = ["youtube.com/watch?v=", "youtu.be/"]
        .iter()
        .find_map(|marker| url.find(marker).map(|at| &url[at + marker.len()..]))?;

    let id: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if id.is_empty() {
        return None;
    }
    Some(format!("{YOUTUBE_EMBED_BASE}{id}"))
}

/// Short tag shown next to a content row.
pub fn content_label(content_type: &str) -> &'static str {
    match content_type {
        "video" => "[Video]",
        "pdf" => "[PDF]",
        "article" => "[Article]",
        "link" => "[Link]",
        "quiz" => "[Quiz]",
        _ => "[File]",
    }
}
