use inceptionv4::{LabelError, LabelTable, ResourceError, ResourceInfo, ResourceManager};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn labels_resource() -> String {
    (0..1001).map(|i| format!("class {}\n", i)).collect()
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("inceptionv4-resource-tests").join(name);
    let _ = fs::remove_dir_all(&dir);
    dir
}

// Points at a closed local port so any accidental download fails fast
fn unreachable_info() -> ResourceInfo {
    ResourceInfo::labels("http://127.0.0.1:9/inceptionv4classes.txt")
}

// Serves `body` to a single HTTP request and returns the URL to fetch it from
async fn serve_once(body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}/inceptionv4classes.txt", addr)
}

fn cache_entries(manager: &ResourceManager) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(manager.resources_dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_resource_paths() -> Result<(), ResourceError> {
    let manager = ResourceManager::new(fresh_dir("paths"))?;
    let path = manager.get_resource_path(&unreachable_info());
    assert!(path.ends_with("paths/inceptionv4classes.txt"));
    assert!(manager.resources_dir().exists());
    Ok(())
}

#[test]
fn test_cached_resource_loads_without_download() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("cached"))?;
    let contents = labels_resource();
    let info = unreachable_info().with_sha256(sha256_hex(contents.as_bytes()));

    fs::write(manager.get_resource_path(&info), &contents)?;
    assert!(manager.is_resource_downloaded(&info));

    tokio_test::block_on(manager.ensure_resource_downloaded(&info))?;
    let table = manager.load_label_table(&info)?;
    assert_eq!(table.label(3)?, "class 3");
    Ok(())
}

#[test]
fn test_uppercase_hash_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("uppercase"))?;
    let contents = labels_resource();
    let info = unreachable_info().with_sha256(sha256_hex(contents.as_bytes()).to_uppercase());

    fs::write(manager.get_resource_path(&info), &contents)?;
    assert!(manager.verify_resource(&info)?);
    Ok(())
}

#[test]
fn test_missing_resource_is_load_error() -> Result<(), ResourceError> {
    let manager = ResourceManager::new(fresh_dir("missing"))?;
    let result = manager.load_label_table(&unreachable_info());
    assert!(matches!(result, Err(LabelError::ResourceLoad(_))));
    Ok(())
}

#[test]
fn test_truncated_cache_is_table_load_error() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("truncated"))?;
    let info = unreachable_info();
    fs::write(manager.get_resource_path(&info), "class 0\nclass 1\n")?;

    let err = manager.load_label_table(&info).unwrap_err();
    assert!(err.is_table_load_error());

    let table = manager.load_label_table_with(&info, &LabelTable::builder().expected_entries(2))?;
    assert_eq!(table.label(1)?, "class 1");
    Ok(())
}

#[test]
fn test_remove_download() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("remove"))?;
    let info = unreachable_info();
    fs::write(manager.get_resource_path(&info), labels_resource())?;

    manager.remove_download(&info)?;
    assert!(!manager.is_resource_downloaded(&info));
    // Removing twice is fine
    manager.remove_download(&info)?;
    Ok(())
}

#[tokio::test]
async fn test_failed_download_leaves_cache_empty() -> Result<(), ResourceError> {
    let manager = ResourceManager::new(fresh_dir("failed-download"))?;
    let info = unreachable_info();

    let result = manager.ensure_resource_downloaded(&info).await;
    assert!(matches!(result, Err(ResourceError::DownloadError(_))));
    assert!(!manager.is_resource_downloaded(&info));
    Ok(())
}

#[test]
fn test_read_manifest() -> Result<(), Box<dyn std::error::Error>> {
    let dir = fresh_dir("manifest");
    fs::create_dir_all(&dir)?;
    let path = dir.join("labels.json");
    fs::write(
        &path,
        r#"{"name": "classes.txt", "url": "https://example.com/classes.txt", "sha256": "abc"}"#,
    )?;

    let info = ResourceManager::read_manifest(&path)?;
    assert_eq!(info.name, "classes.txt");
    assert_eq!(info.sha256.as_deref(), Some("abc"));

    fs::write(&path, "not json")?;
    assert!(matches!(
        ResourceManager::read_manifest(&path),
        Err(ResourceError::IoError(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_download_replaces_cache_atomically() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("atomic-download"))?;
    let contents = labels_resource();
    let url = serve_once(contents.clone()).await;
    let info = ResourceInfo::labels(url).with_sha256(sha256_hex(contents.as_bytes()));

    fs::write(manager.get_resource_path(&info), "stale")?;
    manager.download_resource(&info).await?;

    assert_eq!(fs::read_to_string(manager.get_resource_path(&info))?, contents);
    assert_eq!(cache_entries(&manager), vec!["inceptionv4classes.txt"]);
    assert_eq!(manager.load_label_table(&info)?.label(1000)?, "class 1000");
    Ok(())
}

#[tokio::test]
async fn test_hash_mismatch_writes_nothing() -> Result<(), ResourceError> {
    let manager = ResourceManager::new(fresh_dir("hash-mismatch"))?;
    let url = serve_once("tampered\n".to_string()).await;
    let info = ResourceInfo::labels(url).with_sha256(sha256_hex(labels_resource().as_bytes()));

    let result = manager.download_resource(&info).await;
    assert!(matches!(result, Err(ResourceError::HashMismatch { .. })));
    assert!(cache_entries(&manager).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_hashed_cache_is_refetched() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("corrupt-hashed"))?;
    let info = unreachable_info().with_sha256(sha256_hex(labels_resource().as_bytes()));
    fs::write(manager.get_resource_path(&info), "corrupted data")?;

    let result = manager.ensure_resource_downloaded(&info).await;
    assert!(matches!(result, Err(ResourceError::DownloadError(_))));
    assert!(!manager.is_resource_downloaded(&info));
    Ok(())
}

#[tokio::test]
async fn test_truncated_unhashed_cache_is_refetched() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("truncated-unhashed"))?;
    let info = unreachable_info();
    fs::write(manager.get_resource_path(&info), "class 0\nclass 1\ncla")?;

    // Nothing to verify against, so the plain check accepts the file
    assert!(manager.verify_resource(&info)?);

    let result = manager.ensure_label_table(&info, &LabelTable::builder()).await;
    assert!(matches!(result, Err(ResourceError::DownloadError(_))));
    assert!(!manager.is_resource_downloaded(&info));
    Ok(())
}

#[tokio::test]
async fn test_truncated_unhashed_cache_recovers() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("truncated-recover"))?;
    let info = ResourceInfo::labels(serve_once(labels_resource()).await);
    fs::write(manager.get_resource_path(&info), "class 0\nclass 1\ncla")?;

    let table = manager.ensure_label_table(&info, &LabelTable::builder()).await?;
    assert_eq!(table.len(), 1001);
    assert_eq!(table.label(2)?, "class 2");
    Ok(())
}

#[tokio::test]
async fn test_valid_unhashed_cache_is_not_refetched() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ResourceManager::new(fresh_dir("valid-unhashed"))?;
    let info = unreachable_info();
    fs::write(manager.get_resource_path(&info), labels_resource())?;

    let table = manager.ensure_label_table(&info, &LabelTable::builder()).await?;
    assert_eq!(table.label(0)?, "class 0");
    Ok(())
}
