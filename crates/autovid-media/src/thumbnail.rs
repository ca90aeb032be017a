// crates/autovid-media/src/thumbnail.rs
//
// Session-lifetime memo of first-frame previews, keyed by absolute path.
//
// No eviction and no invalidation: a file edited after its first decode keeps
// its old thumbnail until the app restarts. Decode failures are not cached,
// so a file that becomes readable later is retried on the next refresh.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

/// Bounding box every preview is fitted into.
pub const THUMB_BOX: (u32, u32) = (120, 90);

/// Tightly packed RGBA8, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub width:  u32,
    pub height: u32,
    pub rgba:   Vec<u8>,
}

/// Produces the first decodable frame of a video, already scaled to fit
/// `max_w × max_h`.
pub trait FrameDecoder {
    fn first_frame(&self, path: &Path, max_w: u32, max_h: u32) -> Result<Thumbnail>;
}

/// Largest size with the source aspect ratio that fits the box. Never
/// upscales. Both sides are at least 1.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (max_w.max(1), max_h.max(1));
    }
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }
    let scale = f64::min(max_w as f64 / src_w as f64, max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

pub struct ThumbnailCache<D: FrameDecoder> {
    decoder: D,
    entries: HashMap<PathBuf, Arc<Thumbnail>>,
}

impl<D: FrameDecoder> ThumbnailCache<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder, entries: HashMap::new() }
    }

    /// Cached preview for `path`, decoding it on first request. `None` when
    /// the file cannot be decoded.
    pub fn get_or_create(&mut self, path: &Path) -> Option<Arc<Thumbnail>> {
        let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        if let Some(hit) = self.entries.get(&key) {
            return Some(Arc::clone(hit));
        }

        let (max_w, max_h) = THUMB_BOX;
        match self.decoder.first_frame(&key, max_w, max_h) {
            Ok(thumb) => {
                let thumb = Arc::new(thumb);
                self.entries.insert(key, Arc::clone(&thumb));
                Some(thumb)
            }
            Err(e) => {
                debug!("[thumb] skipped {}: {e:#}", key.display());
                None
            }
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        std::path::absolute(path)
            .map(|k| self.entries.contains_key(&k))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
