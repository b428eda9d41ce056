use std::path::PathBuf;

use aws_sdk_s3::{primitives::ByteStream, types::ObjectCannedAcl};
use uuid::Uuid;

use crate::config::UploadConfig;

use super::UploadError;

const UPLOAD_FOLDER: &str = "profile-images";

/// Storage backend for processed images. Constructed once at startup;
/// handlers only see `upload`.
pub enum Uploader {
    Local(LocalStore),
    S3(S3Store),
}

impl Uploader {
    pub async fn from_config(config: &UploadConfig) -> Self {
        match config {
            UploadConfig::Local { dir } => Uploader::Local(LocalStore { dir: dir.clone() }),
            UploadConfig::S3 { bucket, region } => {
                let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(aws_config::Region::new(region.clone()))
                    .load()
                    .await;
                Uploader::S3(S3Store {
                    client: aws_sdk_s3::Client::new(&sdk_config),
                    bucket: bucket.clone(),
                })
            }
        }
    }

    /// Persist an optimized JPEG under a fresh object key and return its
    /// public URL.
    pub async fn upload(&self, data: Vec<u8>) -> Result<String, UploadError> {
        let key = object_key();
        match self {
            Uploader::Local(store) => store.put(&key, data).await,
            Uploader::S3(store) => store.put(&key, data).await,
        }
    }
}

/// Collision-resistant object key: a random 128-bit identifier.
fn object_key() -> String {
    format!("{UPLOAD_FOLDER}/{}.jpg", Uuid::new_v4())
}

fn local_url(key: &str) -> String {
    format!("/uploads/{key}")
}

fn bucket_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    async fn put(&self, key: &str, data: Vec<u8>) -> Result<String, UploadError> {
        let path = self.dir.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| UploadError::Storage(format!("Failed to create upload dir: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| UploadError::Storage(format!("Failed to write {}: {e}", path.display())))?;

        Ok(local_url(key))
    }
}

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    async fn put(&self, key: &str, data: Vec<u8>) -> Result<String, UploadError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type("image/jpeg")
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| UploadError::Storage(format!("Failed to upload to S3: {e}")))?;

        Ok(bucket_url(&self.bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_unique_jpgs() {
        let a = object_key();
        let b = object_key();
        assert_ne!(a, b);
        assert!(a.starts_with("profile-images/"));
        assert!(a.ends_with(".jpg"));
        // "profile-images/" + 36-char uuid + ".jpg"
        assert_eq!(a.len(), "profile-images/".len() + 36 + 4);
    }

    #[test]
    fn url_shapes_are_deterministic() {
        assert_eq!(
            local_url("profile-images/abc.jpg"),
            "/uploads/profile-images/abc.jpg"
        );
        assert_eq!(
            bucket_url("my-bucket", "profile-images/abc.jpg"),
            "https://my-bucket.s3.amazonaws.com/profile-images/abc.jpg"
        );
    }

    #[tokio::test]
    async fn local_store_writes_and_returns_url() {
        let dir = std::env::temp_dir().join(format!("potluck-test-{}", Uuid::new_v4()));
        let store = LocalStore { dir: dir.clone() };

        let url = store.put("profile-images/test.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(url, "/uploads/profile-images/test.jpg");

        let written = tokio::fs::read(dir.join("profile-images/test.jpg")).await.unwrap();
        assert_eq!(written, vec![1, 2, 3]);

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}
