//! Tag recording
//!
//! Each extracted `attribute -> value` pair becomes a Tag (value) inside a Category
//! (attribute). Existing categories and tags are reused, so the same EXIF value found on
//! many images maps to a single tag.

use photospective_core::constants::MAX_DESCRIPTOR_LEN;
use photospective_core::models::Tag;
use photospective_core::AppError;
use photospective_db::TagRecordStore;
use photospective_processing::ExifTags;

pub struct TagRecorder;

impl TagRecorder {
    /// Record `tags` for `image_id` and return the tags that were linked.
    ///
    /// Pairs whose name or value is empty after cleanup are skipped. The first store
    /// failure aborts the recording; links made before it are kept.
    pub async fn record<S>(store: &S, image_id: i64, tags: &ExifTags) -> Result<Vec<Tag>, AppError>
    where
        S: TagRecordStore + ?Sized,
    {
        let mut entries: Vec<(&String, &String)> = tags.iter().collect();
        entries.sort();

        let mut linked = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            let (Some(category_name), Some(descriptor)) =
                (sanitize_descriptor(name), sanitize_descriptor(value))
            else {
                tracing::debug!(image_id, attribute = %name, "Skipping blank EXIF pair");
                continue;
            };

            let category = store.upsert_category(&category_name).await?;
            let tag = store.upsert_tag(&descriptor, category.id).await?;
            store.attach_tag(tag.id, image_id).await?;
            linked.push(tag);
        }

        tracing::info!(image_id, tag_count = linked.len(), "Recorded image tags");

        Ok(linked)
    }
}

/// Strip NULs and surrounding whitespace and cap the length in characters.
pub fn sanitize_descriptor(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| *c != '\0').collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_DESCRIPTOR_LEN).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::InMemoryGalleryStore;
    use photospective_db::GalleryStore;

    fn exif(pairs: &[(&str, &str)]) -> ExifTags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sanitize_descriptor() {
        assert_eq!(sanitize_descriptor("  Canon\0 "), Some("Canon".to_string()));
        assert_eq!(sanitize_descriptor("\0\0"), None);
        assert_eq!(sanitize_descriptor("   "), None);

        let long = "é".repeat(MAX_DESCRIPTOR_LEN + 20);
        let capped = sanitize_descriptor(&long).unwrap();
        assert_eq!(capped.chars().count(), MAX_DESCRIPTOR_LEN);
    }

    #[tokio::test]
    async fn test_record_creates_categories_and_tags() {
        let store = InMemoryGalleryStore::new();
        let user = store.add_user("alice");
        let image = store.insert_image(user.id, "uploads/user_1/a.jpg").await.unwrap();

        let linked = TagRecorder::record(
            &store,
            image.id,
            &exif(&[("Make", "Canon"), ("Model", "EOS 5D")]),
        )
        .await
        .unwrap();

        assert_eq!(linked.len(), 2);
        let tags = store.tags_of_image(image.id).await.unwrap();
        let shown: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        assert_eq!(shown, vec!["Make : Canon", "Model : EOS 5D"]);
    }

    #[tokio::test]
    async fn test_existing_pair_reuses_tag() {
        let store = InMemoryGalleryStore::new();
        let user = store.add_user("alice");
        let first = store.insert_image(user.id, "a.jpg").await.unwrap();
        let second = store.insert_image(user.id, "b.jpg").await.unwrap();

        let a = TagRecorder::record(&store, first.id, &exif(&[("Make", "Canon")]))
            .await
            .unwrap();
        let b = TagRecorder::record(&store, second.id, &exif(&[("Make", "Canon")]))
            .await
            .unwrap();

        assert_eq!(a[0].id, b[0].id);
        assert_eq!(store.tag_count(), 1);
        assert_eq!(store.category_count(), 1);
    }

    #[tokio::test]
    async fn test_same_value_in_other_category_is_distinct() {
        let store = InMemoryGalleryStore::new();
        let user = store.add_user("alice");
        let image = store.insert_image(user.id, "a.jpg").await.unwrap();

        let linked = TagRecorder::record(
            &store,
            image.id,
            &exif(&[("Artist", "Canon"), ("Make", "Canon")]),
        )
        .await
        .unwrap();

        assert_ne!(linked[0].id, linked[1].id);
        assert_ne!(linked[0].category_id, linked[1].category_id);
    }

    #[tokio::test]
    async fn test_blank_pairs_are_skipped() {
        let store = InMemoryGalleryStore::new();
        let user = store.add_user("alice");
        let image = store.insert_image(user.id, "a.jpg").await.unwrap();

        let linked = TagRecorder::record(
            &store,
            image.id,
            &exif(&[("Make", "\0"), (" ", "value"), ("Model", "X100")]),
        )
        .await
        .unwrap();

        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].descriptor, "X100");
    }

    #[tokio::test]
    async fn test_recording_twice_links_once() {
        let store = InMemoryGalleryStore::new();
        let user = store.add_user("alice");
        let image = store.insert_image(user.id, "a.jpg").await.unwrap();
        let tags = exif(&[("Make", "Canon")]);

        TagRecorder::record(&store, image.id, &tags).await.unwrap();
        TagRecorder::record(&store, image.id, &tags).await.unwrap();

        assert_eq!(store.tags_of_image(image.id).await.unwrap().len(), 1);
    }
}
