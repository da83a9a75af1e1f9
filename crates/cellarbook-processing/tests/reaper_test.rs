mod helpers;

use std::sync::Arc;

use cellarbook_core::{SharedSettings, StoredAssetPair, UploadCandidate};
use cellarbook_processing::{AssetReaper, ImageIngestionPipeline};
use cellarbook_storage::LocalAssetStore;
use helpers::fixtures::create_test_jpeg;
use helpers::*;
use tempfile::TempDir;

async fn ingest_one(dir: &TempDir) -> StoredAssetPair {
    ImageIngestionPipeline::local(provider_in(dir))
        .ingest(Some(UploadCandidate::from_bytes(
            "wine.jpg",
            create_test_jpeg(64, 64),
        )))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let dirs = dirs_in(dir.path());
    let pair = ingest_one(&dir).await;
    let reaper = AssetReaper::local(Some(provider_in(&dir)));

    reaper.delete_pair(&pair).await;
    assert!(!physical_primary(&dirs, &pair.primary_path).exists());
    assert!(!physical_thumbnail(&dirs, &pair.thumbnail_path).exists());

    // Second delete of the same pair is a no-op.
    reaper.delete_pair(&pair).await;
    assert_eq!(file_count(&dirs.upload_dir), 0);
}

#[tokio::test]
async fn test_delete_with_absent_paths_does_nothing() {
    let dir = TempDir::new().unwrap();
    let dirs = dirs_in(dir.path());
    let pair = ingest_one(&dir).await;
    let reaper = AssetReaper::local(Some(provider_in(&dir)));

    reaper.delete(None, None).await;
    reaper.delete(Some(""), Some("   ")).await;

    assert_eq!(file_count(&dirs.upload_dir), 1);
    assert_eq!(file_count(&dirs.thumbnail_dir), 1);
    assert!(physical_primary(&dirs, &pair.primary_path).exists());
}

#[tokio::test]
async fn test_delete_only_primary() {
    let dir = TempDir::new().unwrap();
    let dirs = dirs_in(dir.path());
    let pair = ingest_one(&dir).await;

    AssetReaper::local(Some(provider_in(&dir)))
        .delete(Some(&pair.primary_path), None)
        .await;

    assert!(!physical_primary(&dirs, &pair.primary_path).exists());
    assert!(physical_thumbnail(&dirs, &pair.thumbnail_path).exists());
}

#[tokio::test]
async fn test_delete_missing_files_is_silent() {
    let dir = TempDir::new().unwrap();
    let reaper = AssetReaper::local(Some(provider_in(&dir)));
    reaper
        .delete_pair(&StoredAssetPair::from_names("gone.jpg", "thumb_gone.jpg"))
        .await;
}

#[tokio::test]
async fn test_delete_legacy_absolute_path() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("old_photo.jpg");
    std::fs::write(&legacy, b"jpeg").unwrap();

    let reaper = AssetReaper::local(Some(provider_in(&dir)));
    reaper.delete(legacy.to_str(), None).await;

    assert!(!legacy.exists());
}

#[tokio::test]
async fn test_delete_honors_relocated_directories() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let shared = SharedSettings::new(settings_in(first_dir.path()));
    let pipeline = ImageIngestionPipeline::new(
        Arc::new(shared.clone()),
        Arc::new(LocalAssetStore::new()),
    );
    let reaper = AssetReaper::local(Some(Arc::new(shared.clone())));

    shared.relocate(dirs_in(second_dir.path()));
    let pair = pipeline
        .ingest(Some(UploadCandidate::from_bytes(
            "moved.jpg",
            create_test_jpeg(32, 32),
        )))
        .await
        .unwrap();

    let second = dirs_in(second_dir.path());
    assert!(physical_primary(&second, &pair.primary_path).exists());

    reaper.delete_pair(&pair).await;
    assert_eq!(file_count(&second.upload_dir), 0);
    assert_eq!(file_count(&second.thumbnail_dir), 0);
}
