//! Tag-set intersection
//!
//! Answers "which of my photos carry all of these tags". Tag identifiers arrive as raw
//! strings (query parameters, CLI arguments); anything that is not the id of an
//! existing tag is ignored rather than rejected.

use photospective_core::models::Image;
use photospective_core::AppError;
use photospective_db::ImageTagStore;
use std::collections::HashSet;

/// Images of `user_id` that carry every valid tag in `tokens`.
///
/// Tokens are trimmed and parsed as integers; tokens that do not parse or name no
/// existing tag are skipped. With no valid token at all, every image of the user is
/// returned. The result keeps the newest-first order of the user's gallery, so it does
/// not depend on the order of `tokens`.
pub async fn images_with_all_tags<S, T>(
    store: &S,
    user_id: i64,
    tokens: &[T],
) -> Result<Vec<Image>, AppError>
where
    S: ImageTagStore + ?Sized,
    T: AsRef<str>,
{
    let universe = store.images_of_user(user_id).await?;

    let mut running: HashSet<i64> = HashSet::new();
    let mut seeded = false;

    for token in tokens {
        let raw = token.as_ref().trim();
        let Ok(tag_id) = raw.parse::<i64>() else {
            tracing::debug!(token = %raw, "Ignoring non-numeric tag token");
            continue;
        };
        let Some(tag) = store.find_tag(tag_id).await? else {
            tracing::debug!(tag_id, "Ignoring unknown tag id");
            continue;
        };

        let carrying: HashSet<i64> = store
            .images_of_user_with_tag(user_id, tag.id)
            .await?
            .into_iter()
            .map(|image| image.id)
            .collect();

        if seeded {
            running.retain(|id| carrying.contains(id));
        } else {
            running = carrying;
            seeded = true;
        }
    }

    if !seeded {
        return Ok(universe);
    }

    Ok(universe
        .into_iter()
        .filter(|image| running.contains(&image.id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::InMemoryGalleryStore;
    use photospective_db::{GalleryStore, TagRecordStore};

    struct Fixture {
        store: InMemoryGalleryStore,
        user_id: i64,
        canon_lens: i64,
        canon_only: i64,
        nikon: i64,
        canon: i64,
        lens: i64,
        nikon_tag: i64,
    }

    /// Three images of one user plus one image of another user carrying every tag.
    async fn fixture() -> Fixture {
        let store = InMemoryGalleryStore::new();
        let user = store.add_user("alice");
        let other = store.add_user("bob");

        let make = store.upsert_category("Make").await.unwrap();
        let lens_category = store.upsert_category("LensModel").await.unwrap();
        let canon = store.upsert_tag("Canon", make.id).await.unwrap();
        let nikon = store.upsert_tag("Nikon", make.id).await.unwrap();
        let lens = store.upsert_tag("50mm", lens_category.id).await.unwrap();

        let canon_lens = store.insert_image(user.id, "a.jpg").await.unwrap();
        let canon_only = store.insert_image(user.id, "b.jpg").await.unwrap();
        let nikon_image = store.insert_image(user.id, "c.jpg").await.unwrap();
        let foreign = store.insert_image(other.id, "d.jpg").await.unwrap();

        store.attach_tag(canon.id, canon_lens.id).await.unwrap();
        store.attach_tag(lens.id, canon_lens.id).await.unwrap();
        store.attach_tag(canon.id, canon_only.id).await.unwrap();
        store.attach_tag(nikon.id, nikon_image.id).await.unwrap();
        for tag in [canon.id, nikon.id, lens.id] {
            store.attach_tag(tag, foreign.id).await.unwrap();
        }

        Fixture {
            store,
            user_id: user.id,
            canon_lens: canon_lens.id,
            canon_only: canon_only.id,
            nikon: nikon_image.id,
            canon: canon.id,
            lens: lens.id,
            nikon_tag: nikon.id,
        }
    }

    fn ids(images: &[Image]) -> Vec<i64> {
        images.iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn test_both_tags_select_only_matching_image() {
        let f = fixture().await;
        let tokens = [f.canon.to_string(), f.lens.to_string()];

        let result = images_with_all_tags(&f.store, f.user_id, &tokens).await.unwrap();

        assert_eq!(ids(&result), vec![f.canon_lens]);
    }

    #[tokio::test]
    async fn test_single_tag_keeps_universe_order() {
        let f = fixture().await;
        let tokens = [f.canon.to_string()];

        let result = images_with_all_tags(&f.store, f.user_id, &tokens).await.unwrap();

        // Newest first
        assert_eq!(ids(&result), vec![f.canon_only, f.canon_lens]);
    }

    #[tokio::test]
    async fn test_token_order_does_not_matter() {
        let f = fixture().await;
        let forward = [f.canon.to_string(), f.lens.to_string(), "x".to_string()];
        let backward = ["x".to_string(), f.lens.to_string(), f.canon.to_string()];

        let a = images_with_all_tags(&f.store, f.user_id, &forward).await.unwrap();
        let b = images_with_all_tags(&f.store, f.user_id, &backward).await.unwrap();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_only_invalid_tokens_return_universe() {
        let f = fixture().await;
        let tokens = ["", "abc", "99999", "1.5", "-"];

        let result = images_with_all_tags(&f.store, f.user_id, &tokens).await.unwrap();

        assert_eq!(ids(&result), vec![f.nikon, f.canon_only, f.canon_lens]);
    }

    #[tokio::test]
    async fn test_no_tokens_return_universe() {
        let f = fixture().await;
        let tokens: [&str; 0] = [];

        let result = images_with_all_tags(&f.store, f.user_id, &tokens).await.unwrap();

        assert_eq!(result.len(), 3);
    }

    #[tokio::test]
    async fn test_tokens_are_trimmed() {
        let f = fixture().await;
        let tokens = [format!("  {} ", f.nikon_tag)];

        let result = images_with_all_tags(&f.store, f.user_id, &tokens).await.unwrap();

        assert_eq!(ids(&result), vec![f.nikon]);
    }

    #[tokio::test]
    async fn test_empty_intermediate_result_stays_empty() {
        let f = fixture().await;
        // Nikon and 50mm never appear together; Canon afterwards must not reseed
        let tokens = [
            f.nikon_tag.to_string(),
            f.lens.to_string(),
            f.canon.to_string(),
        ];

        let result = images_with_all_tags(&f.store, f.user_id, &tokens).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_other_users_images_are_never_returned() {
        let f = fixture().await;
        let stranger = f.store.add_user("carol");
        let tokens = [f.canon.to_string()];

        let result = images_with_all_tags(&f.store, stranger.id, &tokens).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_store_faults_propagate() {
        let f = fixture().await;
        f.store.fail_tag_lookups(true);
        let tokens = [f.canon.to_string()];

        let result = images_with_all_tags(&f.store, f.user_id, &tokens).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
