//! Ordered chunk collection with a cursor.
//!
//! The store owns chunk lifecycle: add/remove/navigate/update plus wholesale
//! replacement after re-segmentation. Content is authoritative; the rendered
//! image is a derived cache guarded by a per-chunk version counter so a slow
//! render finishing after a newer edit can never overwrite it.

use crate::rendering::RasterImage;

/// One unit of content destined for one rendered image
#[derive(Debug, Clone)]
pub struct Chunk {
    pub content: String,
    pub image: Option<RasterImage>,
    /// 1-based display number, contiguous after every structural change
    pub order: usize,
    version: u64,
}

impl Chunk {
    fn new(content: String) -> Self {
        Self {
            content,
            image: None,
            order: 0,
            version: 0,
        }
    }

    /// Current content version; renders commit only against a matching version
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn character_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Cursor movement direction (no wraparound)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Ordered chunk sequence; always holds at least one chunk
#[derive(Debug)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
    cursor: usize,
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStore {
    /// A store with a single empty chunk, cursor on it
    pub fn new() -> Self {
        let mut store = Self {
            chunks: vec![Chunk::new(String::new())],
            cursor: 0,
        };
        store.renumber();
        store
    }

    // No is_empty: the store holds at least one chunk by construction.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    pub fn current(&self) -> &Chunk {
        &self.chunks[self.cursor]
    }

    /// Append an empty chunk and move the cursor to it; returns its index
    pub fn add_chunk(&mut self) -> usize {
        self.chunks.push(Chunk::new(String::new()));
        self.cursor = self.chunks.len() - 1;
        self.renumber();
        self.cursor
    }

    /// Remove the chunk at the cursor; a no-op when only one chunk remains.
    /// Returns the cursor position afterwards.
    pub fn remove_chunk(&mut self) -> usize {
        if self.chunks.len() > 1 {
            self.chunks.remove(self.cursor);
            self.cursor = self.cursor.min(self.chunks.len() - 1);
            self.renumber();
        }
        self.cursor
    }

    /// Replace the content at `index`, dropping any cached image and bumping
    /// the version. Returns the new version, or None when `index` is out of
    /// range (contract violation; state unchanged).
    pub fn update_chunk(&mut self, index: usize, content: impl Into<String>) -> Option<u64> {
        let chunk = self.chunks.get_mut(index)?;
        chunk.content = content.into();
        chunk.image = None;
        chunk.version += 1;
        Some(chunk.version)
    }

    /// Commit a finished render for `index` if `version` still matches the
    /// chunk's content. Stale or out-of-range commits are dropped, and a
    /// whitespace-only chunk never accepts an image.
    pub fn commit_render(&mut self, index: usize, version: u64, image: RasterImage) -> bool {
        let Some(chunk) = self.chunks.get_mut(index) else {
            log::debug!("render commit for missing chunk {index} dropped");
            return false;
        };
        if chunk.version != version {
            log::debug!(
                "stale render for chunk {index} dropped (version {version}, current {})",
                chunk.version
            );
            return false;
        }
        if chunk.content.trim().is_empty() {
            return false;
        }
        chunk.image = Some(image);
        true
    }

    /// Move the cursor one step, clamped at the ends; returns the new cursor
    pub fn navigate(&mut self, direction: Direction) -> usize {
        self.cursor = match direction {
            Direction::Prev => self.cursor.saturating_sub(1),
            Direction::Next => (self.cursor + 1).min(self.chunks.len() - 1),
        };
        self.cursor
    }

    /// Jump to `index`; out-of-range requests are rejected with no change
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.chunks.len() {
            self.cursor = index;
            true
        } else {
            log::debug!("cursor jump to {index} rejected (len {})", self.chunks.len());
            false
        }
    }

    /// Discard the whole sequence in favor of `contents`, resetting the
    /// cursor to 0. An empty `contents` leaves a single empty chunk so the
    /// store never becomes empty.
    pub fn replace_all(&mut self, contents: Vec<String>) {
        self.chunks = if contents.is_empty() {
            vec![Chunk::new(String::new())]
        } else {
            contents.into_iter().map(Chunk::new).collect()
        };
        self.cursor = 0;
        self.renumber();
    }

    fn renumber(&mut self) {
        for (i, chunk) in self.chunks.iter_mut().enumerate() {
            chunk.order = i + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::RasterImage;

    fn image() -> RasterImage {
        RasterImage {
            width: 1,
            height: 1,
            png_data: vec![1, 2, 3],
        }
    }

    #[test]
    fn new_store_has_one_empty_chunk() {
        let store = ChunkStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.cursor(), 0);
        assert_eq!(store.current().content, "");
        assert_eq!(store.current().order, 1);
    }

    #[test]
    fn add_chunk_appends_and_moves_cursor() {
        let mut store = ChunkStore::new();
        let idx = store.add_chunk();
        assert_eq!(idx, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.cursor(), 1);
    }

    #[test]
    fn store_never_becomes_empty() {
        let mut store = ChunkStore::new();
        store.remove_chunk();
        store.replace_all(Vec::new());
        store.add_chunk();
        store.remove_chunk();
        store.remove_chunk();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_last_remaining_chunk_is_a_noop() {
        let mut store = ChunkStore::new();
        store.update_chunk(0, "keep me");
        store.remove_chunk();
        assert_eq!(store.len(), 1);
        assert_eq!(store.current().content, "keep me");
    }

    #[test]
    fn remove_clamps_cursor() {
        let mut store = ChunkStore::new();
        store.add_chunk();
        store.add_chunk();
        assert_eq!(store.cursor(), 2);
        store.remove_chunk();
        assert_eq!(store.cursor(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn orders_stay_contiguous_after_removal() {
        let mut store = ChunkStore::new();
        store.update_chunk(0, "a");
        store.add_chunk();
        store.update_chunk(1, "b");
        store.add_chunk();
        store.update_chunk(2, "c");
        store.set_cursor(1);
        store.remove_chunk();
        let orders: Vec<usize> = store.chunks().iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2]);
        let contents: Vec<&str> = store.chunks().iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "c"]);
    }

    #[test]
    fn navigate_clamps_without_wraparound() {
        let mut store = ChunkStore::new();
        store.add_chunk();
        store.set_cursor(0);
        assert_eq!(store.navigate(Direction::Prev), 0);
        assert_eq!(store.navigate(Direction::Next), 1);
        assert_eq!(store.navigate(Direction::Next), 1);
    }

    #[test]
    fn out_of_range_cursor_is_rejected_without_change() {
        let mut store = ChunkStore::new();
        store.add_chunk();
        store.set_cursor(0);
        assert!(!store.set_cursor(2));
        assert_eq!(store.cursor(), 0);
    }

    #[test]
    fn update_bumps_version_and_drops_image() {
        let mut store = ChunkStore::new();
        let v1 = store.update_chunk(0, "first").unwrap();
        assert!(store.commit_render(0, v1, image()));
        assert!(store.current().image.is_some());

        let v2 = store.update_chunk(0, "second").unwrap();
        assert!(v2 > v1);
        assert!(store.current().image.is_none());
    }

    #[test]
    fn stale_render_commit_is_dropped() {
        let mut store = ChunkStore::new();
        let v1 = store.update_chunk(0, "first").unwrap();
        let _v2 = store.update_chunk(0, "second").unwrap();
        // The render for "first" finishes late; it must not stick.
        assert!(!store.commit_render(0, v1, image()));
        assert!(store.current().image.is_none());
    }

    #[test]
    fn whitespace_chunk_never_holds_an_image() {
        let mut store = ChunkStore::new();
        let v = store.update_chunk(0, "   \n  ").unwrap();
        assert!(!store.commit_render(0, v, image()));
        assert!(store.current().image.is_none());
    }

    #[test]
    fn update_out_of_range_is_rejected() {
        let mut store = ChunkStore::new();
        assert!(store.update_chunk(5, "nope").is_none());
    }

    #[test]
    fn replace_all_resets_cursor_and_renumbers() {
        let mut store = ChunkStore::new();
        store.add_chunk();
        store.replace_all(vec!["one".into(), "two".into(), "three".into()]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.cursor(), 0);
        let orders: Vec<usize> = store.chunks().iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn replace_all_with_nothing_keeps_one_empty_chunk() {
        let mut store = ChunkStore::new();
        store.update_chunk(0, "old");
        store.replace_all(Vec::new());
        assert_eq!(store.len(), 1);
        assert_eq!(store.current().content, "");
    }
}
