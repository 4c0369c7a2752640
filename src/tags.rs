//! Tag derivation from URL structure.
//!
//! Every route gets at most one tag, picked from the segments of its URL. A
//! heat-map counts how many routes share a segment at the same position; the
//! tag is the segment closest to the end of the URL which is shared with
//! another route, falling back to the leading segment.

use crate::url_template::{is_param_segment, is_version_segment, segments};
use log::debug;
use std::collections::HashMap;

/// Segments which never make a meaningful tag
const BANNED_TAGS: &[&str] = &["s2s", "api"];

/// Segment frequency map of one API version
#[derive(Debug, Default)]
pub struct TagHeatmap {
    /// Filtered URL segments per route uid
    tags: HashMap<String, Vec<String>>,
    /// Number of routes sharing a segment at a position
    heatmap: HashMap<(String, usize), usize>,
}

impl TagHeatmap {
    /// Build the heat-map from `(uid, url)` pairs
    pub fn build<'a, I>(routes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = TagHeatmap::default();

        for (uid, url) in routes {
            let tags: Vec<String> = segments(url)
                .into_iter()
                .filter(|segment| !is_banned_tag(segment))
                .map(str::to_string)
                .collect();

            for (index, tag) in tags.iter().enumerate() {
                *out.heatmap.entry((tag.clone(), index)).or_insert(0) += 1;
            }

            out.tags.insert(uid.to_string(), tags);
        }

        debug!("Built tag heat-map with {} entries", out.heatmap.len());
        out
    }

    /// How many routes share `tag` at `position`
    pub fn count(&self, tag: &str, position: usize) -> usize {
        self.heatmap
            .get(&(tag.to_string(), position))
            .copied()
            .unwrap_or(0)
    }

    /// Tags of a route, `None` when the route has no usable segment
    pub fn tags_for(&self, uid: &str) -> Option<Vec<String>> {
        let tags = self.tags.get(uid)?;

        tags.iter()
            .enumerate()
            .rev()
            .find(|(index, tag)| *index == 0 || self.count(tag, *index) > 1)
            .map(|(_, tag)| vec![tag.clone()])
    }
}

/// Derive tags of all routes given as `(uid, url)` pairs.
///
/// Routes without a usable segment map to an empty list.
pub fn derive_tags<'a, I>(routes: I) -> HashMap<String, Vec<String>>
where
    I: IntoIterator<Item = (&'a str, &'a str)> + Clone,
{
    let heatmap = TagHeatmap::build(routes.clone());
    routes
        .into_iter()
        .map(|(uid, _)| (uid.to_string(), heatmap.tags_for(uid).unwrap_or_default()))
        .collect()
}

/// Version strings, path placeholders and generic words are banned
pub fn is_banned_tag(segment: &str) -> bool {
    BANNED_TAGS.contains(&segment) || is_version_segment(segment) || is_param_segment(segment)
}
