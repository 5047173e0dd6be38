//! Memoized wrap results.
//!
//! Keyed by `(text, font, max_width, options)`. The cache never watches for
//! font or column-width changes; hosts call the `invalidate*` methods when
//! those change.

use dashmap::DashMap;
use ordered_float::OrderedFloat;
use std::sync::Arc;

use super::wrap::{WrapOptions, try_wrap_lines};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    pub text: String,
    /// Opaque font descriptor, e.g. "13px Inter".
    pub font: String,
    pub max_width: OrderedFloat<f32>,
    pub options: WrapOptions,
}

impl LayoutKey {
    pub fn new(
        text: impl Into<String>,
        font: impl Into<String>,
        max_width: f32,
        options: WrapOptions,
    ) -> LayoutKey {
        LayoutKey {
            text: text.into(),
            font: font.into(),
            max_width: OrderedFloat(max_width),
            options,
        }
    }
}

/// Wrap cache owned by a host and shared by reference.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: DashMap<LayoutKey, Arc<[String]>>,
}

impl LayoutCache {
    pub fn new() -> LayoutCache {
        LayoutCache::default()
    }

    /// Cached lines for `key`, wrapping with `measure` on a miss.
    pub fn wrap<F>(&self, key: &LayoutKey, mut measure: F) -> Arc<[String]>
    where
        F: FnMut(&str) -> f32,
    {
        match self.try_wrap(key, |s| Ok::<f32, std::convert::Infallible>(measure(s))) {
            Ok(lines) => lines,
            Err(never) => match never {},
        }
    }

    /// Like [`LayoutCache::wrap`], but a failing measure is returned and
    /// nothing is cached.
    pub fn try_wrap<F, E>(&self, key: &LayoutKey, measure: F) -> Result<Arc<[String]>, E>
    where
        F: FnMut(&str) -> Result<f32, E>,
    {
        if let Some(hit) = self.entries.get(key) {
            return Ok(Arc::clone(hit.value()));
        }
        // No map guard is held while measuring.
        let lines: Arc<[String]> =
            try_wrap_lines(&key.text, key.max_width.into_inner(), measure, key.options)?.into();
        self.entries.insert(key.clone(), Arc::clone(&lines));
        tracing::trace!(font = %key.font, width = %key.max_width, lines = lines.len(), "wrap cached");
        Ok(lines)
    }

    pub fn get(&self, key: &LayoutKey) -> Option<Arc<[String]>> {
        self.entries.get(key).map(|hit| Arc::clone(hit.value()))
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&self, key: &LayoutKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry measured with `font`. Returns how many were dropped.
    pub fn invalidate_font(&self, font: &str) -> usize {
        self.invalidate_where(|key| key.font == font)
    }

    /// Drop every entry wrapped at `max_width`.
    pub fn invalidate_width(&self, max_width: f32) -> usize {
        let width = OrderedFloat(max_width);
        self.invalidate_where(|key| key.max_width == width)
    }

    fn invalidate_where(&self, pred: impl Fn(&LayoutKey) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !pred(key));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::debug!(dropped, "layout cache invalidated");
        }
        dropped
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
