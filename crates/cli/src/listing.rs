//! Search-results listing.
//!
//! The terminal analog of the host player's directory listing: one block
//! per result with its label and the invocation target that downloads it.
//! A listing is finalized exactly once, in every code path, even when
//! population stopped halfway.

use rosub_provider::SubtitleListing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub label: String,
    pub poster: Option<String>,
    pub target: String,
}

impl ListingEntry {
    pub fn from_listing(item: &SubtitleListing) -> Self {
        Self {
            label: item.title.clone(),
            poster: item.poster.clone(),
            target: download_target(&item.id),
        }
    }
}

/// Query string that invokes the download action for a search hit.
pub fn download_target(id: &str) -> String {
    format!("action=download&id={id}")
}

#[derive(Debug, Default)]
pub struct Listing {
    entries: Vec<ListingEntry>,
    finished: bool,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ListingEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Flush the listing to stdout. Idempotent.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        print!("{}", self.render());
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (position, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("[{:>2}] {}\n", position + 1, entry.label));
            if let Some(poster) = &entry.poster {
                out.push_str(&format!("     poster: {poster}\n"));
            }
            out.push_str(&format!("     rosub \"{}\"\n", entry.target));
        }
        out
    }
}
