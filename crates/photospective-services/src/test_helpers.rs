//! In-memory store for service tests

use async_trait::async_trait;
use chrono::Utc;
use photospective_core::models::{Category, Image, Tag, TagWithCategory, User};
use photospective_core::AppError;
use photospective_db::{GalleryStore, ImageTagStore, TagRecordStore};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<User>,
    images: Vec<Image>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    /// (tag_id, image_id)
    links: BTreeSet<(i64, i64)>,
    fail_tag_lookups: bool,
    fail_attach: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn newest_first(mut images: Vec<Image>) -> Vec<Image> {
        images.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        images
    }
}

/// Store backed by vectors behind a mutex, mirroring the Postgres constraints
#[derive(Clone, Default)]
pub struct InMemoryGalleryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryGalleryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> User {
        let mut state = self.state.lock().unwrap();
        let user = User {
            id: state.next_id(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        user
    }

    /// Make every tag lookup fail with an internal error
    pub fn fail_tag_lookups(&self, fail: bool) {
        self.state.lock().unwrap().fail_tag_lookups = fail;
    }

    /// Make every tag link fail with an internal error
    pub fn fail_attach(&self, fail: bool) {
        self.state.lock().unwrap().fail_attach = fail;
    }

    pub fn image_count(&self) -> usize {
        self.state.lock().unwrap().images.len()
    }

    pub fn tag_count(&self) -> usize {
        self.state.lock().unwrap().tags.len()
    }

    pub fn category_count(&self) -> usize {
        self.state.lock().unwrap().categories.len()
    }
}

#[async_trait]
impl ImageTagStore for InMemoryGalleryStore {
    async fn images_of_user(&self, user_id: i64) -> Result<Vec<Image>, AppError> {
        let state = self.state.lock().unwrap();
        let images = state
            .images
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        Ok(State::newest_first(images))
    }

    async fn find_tag(&self, tag_id: i64) -> Result<Option<Tag>, AppError> {
        let state = self.state.lock().unwrap();
        if state.fail_tag_lookups {
            return Err(AppError::Internal("tag lookup failed".to_string()));
        }
        Ok(state.tags.iter().find(|t| t.id == tag_id).cloned())
    }

    async fn images_of_user_with_tag(
        &self,
        user_id: i64,
        tag_id: i64,
    ) -> Result<Vec<Image>, AppError> {
        let state = self.state.lock().unwrap();
        let images = state
            .images
            .iter()
            .filter(|i| i.user_id == user_id && state.links.contains(&(tag_id, i.id)))
            .cloned()
            .collect();
        Ok(State::newest_first(images))
    }
}

#[async_trait]
impl TagRecordStore for InMemoryGalleryStore {
    async fn upsert_category(&self, descriptor: &str) -> Result<Category, AppError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.categories.iter().find(|c| c.descriptor == descriptor) {
            return Ok(existing.clone());
        }
        let category = Category {
            id: state.next_id(),
            descriptor: descriptor.to_string(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn upsert_tag(&self, descriptor: &str, category_id: i64) -> Result<Tag, AppError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .tags
            .iter()
            .find(|t| t.descriptor == descriptor && t.category_id == category_id)
        {
            return Ok(existing.clone());
        }
        let tag = Tag {
            id: state.next_id(),
            descriptor: descriptor.to_string(),
            category_id,
        };
        state.tags.push(tag.clone());
        Ok(tag)
    }

    async fn attach_tag(&self, tag_id: i64, image_id: i64) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_attach {
            return Err(AppError::Internal("attach failed".to_string()));
        }
        state.links.insert((tag_id, image_id));
        Ok(())
    }
}

#[async_trait]
impl GalleryStore for InMemoryGalleryStore {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn insert_image(&self, user_id: i64, path: &str) -> Result<Image, AppError> {
        let mut state = self.state.lock().unwrap();
        if !state.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::Internal("foreign key violation: images.user_id".to_string()));
        }
        let image = Image {
            id: state.next_id(),
            user_id,
            path: path.to_string(),
            created_at: Utc::now(),
        };
        state.images.push(image.clone());
        Ok(image)
    }

    async fn find_image(&self, image_id: i64) -> Result<Option<Image>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.images.iter().find(|i| i.id == image_id).cloned())
    }

    async fn delete_image(&self, image_id: i64) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        let before = state.images.len();
        state.images.retain(|i| i.id != image_id);
        state.links.retain(|(_, linked_image)| *linked_image != image_id);
        Ok(state.images.len() < before)
    }

    async fn tags_of_image(&self, image_id: i64) -> Result<Vec<TagWithCategory>, AppError> {
        let state = self.state.lock().unwrap();
        let mut tags: Vec<TagWithCategory> = state
            .tags
            .iter()
            .filter(|t| state.links.contains(&(t.id, image_id)))
            .filter_map(|t| {
                let category = state.categories.iter().find(|c| c.id == t.category_id)?;
                Some(TagWithCategory {
                    id: t.id,
                    descriptor: t.descriptor.clone(),
                    category_id: t.category_id,
                    category: category.descriptor.clone(),
                })
            })
            .collect();
        tags.sort_by(|a, b| (&a.category, &a.descriptor).cmp(&(&b.category, &b.descriptor)));
        Ok(tags)
    }

    async fn personal_categories(&self, user_id: i64) -> Result<Vec<Category>, AppError> {
        let state = self.state.lock().unwrap();
        let mut categories: Vec<Category> = state
            .categories
            .iter()
            .filter(|c| {
                state.tags.iter().any(|t| {
                    t.category_id == c.id
                        && state.images.iter().any(|i| {
                            i.user_id == user_id && state.links.contains(&(t.id, i.id))
                        })
                })
            })
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.descriptor.cmp(&b.descriptor));
        Ok(categories)
    }

    async fn tags_of_category_for_user(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<Vec<Tag>, AppError> {
        let state = self.state.lock().unwrap();
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|t| {
                t.category_id == category_id
                    && state
                        .images
                        .iter()
                        .any(|i| i.user_id == user_id && state.links.contains(&(t.id, i.id)))
            })
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.descriptor.cmp(&b.descriptor));
        Ok(tags)
    }
}
