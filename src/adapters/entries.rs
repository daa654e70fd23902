use crate::domain::{Item, Source};
use crate::normalizer::admission;
use crate::normalizer::ParsedEntry;

/// Maps feed entries to items in feed order, skipping everything the
/// admission filter rejects. `finish` adds the platform-specific fields
/// (author, media) to each admitted item; the item's description is
/// already unescaped when `finish` runs.
pub fn map_entries<F>(source: &Source, entries: &[ParsedEntry], mut finish: F) -> Vec<Item>
where
    F: FnMut(&ParsedEntry, Item) -> Item,
{
    let watermark = source.watermark();
    let mut items = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(admitted) = admission::admit(index, entry, watermark) else {
            continue;
        };
        let Some(identifier) = entry.identifier() else {
            continue;
        };

        let mut item = Item::new(
            source,
            identifier,
            admitted.title.to_string(),
            admitted.link.to_string(),
            admitted.published_at,
        );
        item.description = entry.unescaped_description();
        items.push(finish(entry, item));
    }

    tracing::debug!(
        source_id = %source.id,
        entries = entries.len(),
        items = items.len(),
        "Mapped feed entries"
    );

    items
}
