//! Reel content and its tripled layout.

use crate::config::ConfigError;
use crate::constants::REEL_COPIES;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReelItem {
    /// Thumbnail URL used as the tile background.
    pub image: String,
    pub preview: String,
    pub title: String,
    pub work: String,
    /// Trusted HTML shown by the caller's detail view.
    pub description: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub video_id: Option<String>,
}

fn empty_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<String> = Option::deserialize(de)?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

impl ReelItem {
    pub fn has_video(&self) -> bool {
        self.video_id.is_some()
    }

    /// Hover clip URL, if the item has one.
    pub fn preview_src(&self) -> Option<&str> {
        let src = self.preview.trim();
        (!src.is_empty()).then_some(src)
    }
}

/// One rendered tile: which copy it belongs to and which item it shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReelSlot {
    pub copy: usize,
    pub index: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reel {
    items: Vec<ReelItem>,
}

impl Reel {
    pub fn new(items: Vec<ReelItem>) -> Self {
        Self { items }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let items: Vec<ReelItem> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[ReelItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.items.len() * REEL_COPIES
    }

    /// Tiles in track order: every item of copy 0, then copy 1, then copy 2.
    pub fn slots(&self) -> impl Iterator<Item = ReelSlot> + '_ {
        (0..REEL_COPIES)
            .flat_map(move |copy| (0..self.items.len()).map(move |index| ReelSlot { copy, index }))
    }

    pub fn slot(&self, position: usize) -> Option<ReelSlot> {
        if position >= self.slot_count() {
            return None;
        }
        let n = self.items.len();
        Some(ReelSlot {
            copy: position / n,
            index: position % n,
        })
    }

    /// Item shown at track position `position`.
    pub fn item_at(&self, position: usize) -> Option<(usize, &ReelItem)> {
        let slot = self.slot(position)?;
        self.items.get(slot.index).map(|item| (slot.index, item))
    }

    /// Track position of the first tile of the middle copy; its left edge is
    /// one loop width from the start of the track.
    pub fn second_copy_start(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<ReelItem> {
        (0..n)
            .map(|i| ReelItem {
                title: format!("item {i}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn empty_video_id_is_none() {
        let reel = Reel::from_json(
            r#"[{"title":"FLAX","videoId":""},{"title":"CCTV","videoId":"8qdRl0o8QBs"},{"title":"COAST"}]"#,
        )
        .unwrap();
        assert_eq!(reel.items()[0].video_id, None);
        assert_eq!(reel.items()[1].video_id.as_deref(), Some("8qdRl0o8QBs"));
        assert!(!reel.items()[2].has_video());
    }

    #[test]
    fn slots_are_three_consecutive_copies() {
        let reel = Reel::new(items(4));
        let slots: Vec<_> = reel.slots().collect();
        assert_eq!(slots.len(), 12);
        assert_eq!(slots[0], ReelSlot { copy: 0, index: 0 });
        assert_eq!(slots[5], ReelSlot { copy: 1, index: 1 });
        assert_eq!(slots[11], ReelSlot { copy: 2, index: 3 });
        assert_eq!(reel.second_copy_start(), Some(4));
    }

    #[test]
    fn item_at_maps_back_to_source_index() {
        let reel = Reel::new(items(3));
        let (idx, item) = reel.item_at(7).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(item.title, "item 1");
        assert!(reel.item_at(9).is_none());
        assert!(Reel::default().slot(0).is_none());
    }

    #[test]
    fn blank_preview_has_no_source() {
        let reel = Reel::from_json(
            r#"[{"title":"FLAX","preview":"assets/flax.mp4"},{"title":"CCTV","preview":"  "},{"title":"COAST"}]"#,
        )
        .unwrap();
        assert_eq!(reel.items()[0].preview_src(), Some("assets/flax.mp4"));
        assert_eq!(reel.items()[1].preview_src(), None);
        assert_eq!(reel.items()[2].preview_src(), None);
    }
}
