//! Path and URL computation, plus the segment normalization used when
//! matching URL segments against item names.

use crate::content::tree::ContentTree;
use crate::error::ContentError;
use crate::types::NodeRef;
use unicode_normalization::UnicodeNormalization;

/// Escape an item name for use as one path segment
pub fn escape_segment(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

/// Decode and normalize one URL segment for name comparison.
///
/// Percent-escapes are decoded (left as-is when not valid UTF-8) and the
/// result is normalized to NFC.
pub fn normalize_segment(segment: &str) -> String {
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    decoded.nfc().collect()
}

/// Whether a normalized URL segment addresses an item called `name`, either
/// directly or with the default `extension` appended. Case-insensitive.
pub fn segment_matches(name: &str, segment: &str, extension: &str) -> bool {
    let name: String = name.nfc().collect();
    let name = name.to_lowercase();
    let segment = segment.to_lowercase();
    if name == segment {
        return true;
    }
    !extension.is_empty()
        && segment.len() == name.len() + extension.len()
        && segment.starts_with(name.as_str())
        && segment.ends_with(extension.to_lowercase().as_str())
}

impl ContentTree {
    /// Rooted path of an item: `/` for a root, `/a/b/` below it.
    ///
    /// Version snapshots report the path of their master. Unnamed ancestors
    /// contribute their id.
    pub fn path(&self, node: NodeRef) -> Result<String, ContentError> {
        let canonical = self.canonical(node);
        let item = self.item(canonical)?;
        if item.parent().is_none() {
            return Ok("/".to_string());
        }

        let mut segments = vec![escape_segment(&item.name_or_id())];
        for ancestor in self.ancestors(canonical) {
            let ancestor = self.item(ancestor)?;
            if ancestor.parent().is_none() {
                break;
            }
            segments.push(escape_segment(&ancestor.name_or_id()));
        }
        segments.reverse();
        Ok(format!("/{}/", segments.join("/")))
    }

    /// Public URL of an item.
    ///
    /// Pages map to their path, with `extension` appended for kinds that use
    /// one; roots and start pages end in `/`. Non-page items point at their
    /// nearest page ancestor with an `item` query parameter.
    pub fn url(&self, node: NodeRef, extension: &str) -> Result<String, ContentError> {
        let item = self.item(node)?;
        if let Some((cached_extension, url)) = &item.url_cache {
            if cached_extension == extension {
                return Ok(url.clone());
            }
        }
        self.compute_url(node, extension)
    }

    /// Compute and cache the URL of an item
    pub fn warm_url(&mut self, node: NodeRef, extension: &str) -> Result<String, ContentError> {
        let url = self.compute_url(node, extension)?;
        self.item_mut(node)?.url_cache = Some((extension.to_string(), url.clone()));
        Ok(url)
    }

    fn compute_url(&self, node: NodeRef, extension: &str) -> Result<String, ContentError> {
        let canonical = self.canonical(node);
        let item = self.item(canonical)?;
        if item.is_page() {
            let path = self.path(canonical)?;
            if path == "/" || !item.kind.uses_extension() {
                return Ok(path);
            }
            return Ok(format!("{}{}", path.trim_end_matches('/'), extension));
        }

        let page = self
            .ancestors(canonical)
            .into_iter()
            .find(|a| self.get(*a).map_or(false, |i| i.is_page()));
        let base = match page {
            Some(page) => self.url(page, extension)?,
            None => "/".to_string(),
        };
        if item.is_transient() {
            Ok(base)
        } else {
            Ok(format!("{}?item={}", base, item.id))
        }
    }
}
