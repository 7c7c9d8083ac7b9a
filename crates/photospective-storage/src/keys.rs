//! Storage key generation.

use photospective_core::constants::UPLOADS_DIR;

/// Key for `filename` in the upload directory of `user_id`.
pub fn user_upload_key(user_id: i64, filename: &str) -> String {
    format!("{}/user_{}/{}", UPLOADS_DIR, user_id, filename)
}

/// `photo.jpg` with attempt 2 becomes `photo_2.jpg`. Attempt 0 keeps the name.
pub fn suffixed_filename(filename: &str, attempt: u32) -> String {
    if attempt == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, attempt, ext),
        _ => format!("{}_{}", filename, attempt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_upload_key() {
        assert_eq!(user_upload_key(7, "cat.jpg"), "uploads/user_7/cat.jpg");
    }

    #[test]
    fn test_suffixed_filename() {
        assert_eq!(suffixed_filename("cat.jpg", 0), "cat.jpg");
        assert_eq!(suffixed_filename("cat.jpg", 3), "cat_3.jpg");
        assert_eq!(suffixed_filename("archive.tar.gz", 1), "archive.tar_1.gz");
        assert_eq!(suffixed_filename("README", 1), "README_1");
    }
}
