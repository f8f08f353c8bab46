use std::path::{Path, PathBuf};
use std::fs;
use std::io;
use std::sync::Arc;
use std::env;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Digest};
use tokio::sync::Mutex;

use crate::labels::{LabelError, LabelTable, LabelTableBuilder, LABELS_RESOURCE_NAME};

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Resource verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {name}")]
    HashMismatch {
        name: String,
        expected: String,
        actual: String,
    },
    #[error(transparent)]
    Labels(#[from] LabelError),
}

/// Where a resource comes from and how to check it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    /// File name inside the cache directory
    #[serde(default = "default_resource_name")]
    pub name: String,
    pub url: String,
    /// Hex SHA-256 of the file. Unverified when absent.
    #[serde(default)]
    pub sha256: Option<String>,
}

fn default_resource_name() -> String {
    LABELS_RESOURCE_NAME.to_string()
}

impl ResourceInfo {
    /// Describes the label resource at `url`, cached as `inceptionv4classes.txt`
    pub fn labels(url: impl Into<String>) -> Self {
        Self {
            name: default_resource_name(),
            url: url.into(),
            sha256: None,
        }
    }

    pub fn with_sha256(mut self, hash: impl Into<String>) -> Self {
        self.sha256 = Some(hash.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct ResourceManager {
    resources_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ResourceManager {
    /// Creates a new ResourceManager with the default resources directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_resources_dir())
    }

    /// Returns the default resources directory path
    pub fn get_default_resources_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("INCEPTIONV4_CACHE") {
            return PathBuf::from(path).join("resources");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("inceptionv4").join("resources");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("inceptionv4").join("resources");
        }

        // 4. If all else fails, use system temp directory
        env::temp_dir().join("inceptionv4").join("resources")
    }

    pub fn new<P: AsRef<Path>>(resources_dir: P) -> io::Result<Self> {
        let resources_dir = resources_dir.as_ref().to_path_buf();
        fs::create_dir_all(&resources_dir)?;
        Ok(Self {
            resources_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    pub fn get_resource_path(&self, info: &ResourceInfo) -> PathBuf {
        self.resources_dir.join(&info.name)
    }

    fn get_partial_path(&self, info: &ResourceInfo) -> PathBuf {
        self.resources_dir.join(format!(".{}.part", info.name))
    }

    pub fn is_resource_downloaded(&self, info: &ResourceInfo) -> bool {
        let path = self.get_resource_path(info);
        log::debug!("Resource path: {:?} (exists: {})", path, path.exists());
        path.exists()
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ResourceError> {
        log::debug!("Verifying file: {:?}", path);
        let bytes = fs::read(path)?;
        let hash = sha256_hex(&bytes);
        log::debug!("Calculated hash: {}", hash);
        log::debug!("Expected hash:   {}", expected_hash);
        Ok(hash.eq_ignore_ascii_case(expected_hash))
    }

    /// Returns true if the resource is cached and matches its hash, if one is set
    pub fn verify_resource(&self, info: &ResourceInfo) -> Result<bool, ResourceError> {
        let path = self.get_resource_path(info);
        if !path.exists() {
            log::info!("Resource {} is not cached", info.name);
            return Ok(false);
        }
        match &info.sha256 {
            Some(expected) => {
                let ok = self.verify_file(&path, expected)?;
                log::info!("Hash verification for {}: {}", info.name, ok);
                Ok(ok)
            }
            None => Ok(true),
        }
    }

    /// Downloads the resource into the cache, replacing any existing copy.
    ///
    /// The hash is checked before anything is written, so a mismatching
    /// download never reaches the cache.
    pub async fn download_resource(&self, info: &ResourceInfo) -> Result<(), ResourceError> {
        let _lock = self.download_lock.lock().await;
        let path = self.get_resource_path(info);

        log::info!("Downloading {} from {} to {:?}", info.name, info.url, path);
        let response = reqwest::get(&info.url).await?.error_for_status()?;
        log::info!("Download response status: {}", response.status());
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        if let Some(expected) = &info.sha256 {
            let hash = sha256_hex(&bytes);
            if !hash.eq_ignore_ascii_case(expected) {
                log::error!("{} hash mismatch: expected {}, got {}", info.name, expected, hash);
                return Err(ResourceError::HashMismatch {
                    name: info.name.clone(),
                    expected: expected.clone(),
                    actual: hash,
                });
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Readers only ever see a complete file at `path`
        let partial = self.get_partial_path(info);
        if let Err(e) = fs::write(&partial, &bytes).and_then(|_| fs::rename(&partial, &path)) {
            match fs::remove_file(&partial) {
                Err(cleanup) if cleanup.kind() != io::ErrorKind::NotFound => {
                    log::warn!("Failed to remove partial download {:?}: {}", partial, cleanup);
                }
                _ => {}
            }
            return Err(e.into());
        }

        if !self.verify_resource(info)? {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("Failed to remove unverified resource {:?}: {}", path, e);
            }
            return Err(ResourceError::VerificationFailed);
        }

        log::info!("{} downloaded and verified successfully", info.name);
        Ok(())
    }

    pub fn remove_download(&self, info: &ResourceInfo) -> Result<(), ResourceError> {
        let path = self.get_resource_path(info);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Ensures that a resource is downloaded and verified.
    /// If the resource doesn't exist, it will be downloaded.
    /// If verification fails, it will be re-downloaded.
    pub async fn ensure_resource_downloaded(&self, info: &ResourceInfo) -> Result<(), ResourceError> {
        if !self.is_resource_downloaded(info) {
            log::info!("Resource {} not found, downloading...", info.name);
            self.download_resource(info).await?;
        } else if !self.verify_resource(info)? {
            log::warn!("Resource {} failed verification, re-downloading...", info.name);
            self.remove_download(info)?;
            self.download_resource(info).await?;
        } else {
            log::info!("Resource {} verified", info.name);
        }
        Ok(())
    }

    /// Ensures the resource is cached and returns the label table built from it.
    ///
    /// A hashed resource is trusted once it verifies. An unhashed one has
    /// nothing to verify against, so a cached copy that does not parse as a
    /// label table is fetched again once before giving up.
    pub async fn ensure_label_table(
        &self,
        info: &ResourceInfo,
        builder: &LabelTableBuilder,
    ) -> Result<LabelTable, ResourceError> {
        self.ensure_resource_downloaded(info).await?;
        match self.load_label_table_with(info, builder) {
            Err(e) if info.sha256.is_none() && e.is_table_load_error() => {
                log::warn!("Cached {} is not a valid label table ({}), re-downloading...", info.name, e);
                self.remove_download(info)?;
                self.download_resource(info).await?;
                Ok(self.load_label_table_with(info, builder)?)
            }
            result => Ok(result?),
        }
    }

    /// Builds the standard label table from the cached resource
    pub fn load_label_table(&self, info: &ResourceInfo) -> Result<LabelTable, LabelError> {
        self.load_label_table_with(info, &LabelTableBuilder::new())
    }

    /// Builds a label table from the cached resource with a custom loader
    pub fn load_label_table_with(
        &self,
        info: &ResourceInfo,
        builder: &LabelTableBuilder,
    ) -> Result<LabelTable, LabelError> {
        builder.load_path(self.get_resource_path(info))
    }

    /// Reads a [`ResourceInfo`] from a JSON manifest file
    pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<ResourceInfo, ResourceError> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ResourceError::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
