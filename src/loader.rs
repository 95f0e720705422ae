//! Dataset loading
//!
//! The dataset is fetched once at startup, from an HTTP(S) URL or a local
//! file, and published into a [`DatasetHandle`]. The handle is shared by
//! everything that searches; once published the dataset is never replaced.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::models::Dataset;

/// Reasons a dataset load fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to fetch travel data: HTTP {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Travel data has already been loaded")]
    AlreadyLoaded,
}

/// Where the dataset document comes from
#[async_trait]
pub trait DatasetSource: Send + Sync + std::fmt::Debug {
    /// Fetch and parse the whole document
    async fn fetch(&self) -> Result<Dataset, LoadError>;

    /// Human readable location, used in logs
    fn describe(&self) -> String;
}

/// Dataset served over HTTP(S)
#[derive(Debug)]
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("travelrec/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoadError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Dataset, LoadError> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        Dataset::from_json(&body).map_err(|e| LoadError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Dataset stored in a local file
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Dataset, LoadError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Io(format!("{}: {e}", self.path.display())))?;

        Dataset::from_json(&body).map_err(|e| LoadError::Parse(e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick the source for a configured location: HTTP for `http://` and
/// `https://` URLs, a local file otherwise
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn DatasetSource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Load progress as seen by readers of a [`DatasetHandle`]
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Dataset>),
    Failed(String),
}

#[derive(Debug, Default)]
struct HandleInner {
    dataset: OnceCell<Arc<Dataset>>,
    failure: OnceCell<String>,
}

/// Shared, write-once slot for the loaded dataset
#[derive(Debug, Clone, Default)]
pub struct DatasetHandle {
    inner: Arc<HandleInner>,
}

impl DatasetHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the dataset. Only the first publish succeeds.
    pub fn publish(&self, dataset: Dataset) -> Result<Arc<Dataset>, LoadError> {
        let dataset = Arc::new(dataset);
        self.inner
            .dataset
            .set(Arc::clone(&dataset))
            .map_err(|_| LoadError::AlreadyLoaded)?;
        Ok(dataset)
    }

    /// Remember why the load failed; the first recorded reason is kept
    pub fn record_failure(&self, reason: impl Into<String>) {
        let _ = self.inner.failure.set(reason.into());
    }

    /// The dataset, once published
    #[must_use]
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.inner.dataset.get().cloned()
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        if let Some(dataset) = self.get() {
            LoadState::Ready(dataset)
        } else if let Some(reason) = self.inner.failure.get() {
            LoadState::Failed(reason.clone())
        } else {
            LoadState::Loading
        }
    }
}

/// Fetch the dataset from `source` and publish it into `handle`.
/// Failures are recorded in the handle; there is no retry.
#[instrument(skip(source, handle), fields(source = %source.describe()))]
pub async fn load(source: &dyn DatasetSource, handle: &DatasetHandle) -> Result<Arc<Dataset>, LoadError> {
    info!("Loading travel data");
    let start_time = Instant::now();

    let dataset = match source.fetch().await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Error fetching travel data: {}", e);
            handle.record_failure(e.to_string());
            return Err(e);
        }
    };

    let (beaches, temples, cities) = dataset.sizes();
    let dataset = handle.publish(dataset)?;

    info!(
        "Travel data loaded successfully in {:.3}s: {} beaches, {} temples, {} cities",
        start_time.elapsed().as_secs_f64(),
        beaches,
        temples,
        cities
    );

    Ok(dataset)
}

/// Run [`load`] in the background. Callers keep using `handle` and see the
/// dataset once it is published.
pub fn spawn_load(source: Box<dyn DatasetSource>, handle: DatasetHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        // the failure is already logged and recorded in the handle
        let _ = load(source.as_ref(), &handle).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{SAMPLE_JSON, sample_dataset};
    use axum::{Router, http::StatusCode, routing::get};
    use std::io::Write;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn test_router() -> Router {
        Router::new()
            .route("/travel_recommendation_api.json", get(|| async { SAMPLE_JSON }))
            .route("/broken.json", get(|| async { "{ not json" }))
            .route("/missing.json", get(|| async { StatusCode::NOT_FOUND }))
    }

    #[test]
    fn test_handle_starts_loading() {
        assert!(matches!(DatasetHandle::new().state(), LoadState::Loading));
    }

    #[test]
    fn test_publish_only_once() {
        let handle = DatasetHandle::new();
        handle.publish(sample_dataset()).unwrap();

        let second = handle.publish(Dataset::default());
        assert_eq!(second.unwrap_err(), LoadError::AlreadyLoaded);
        assert_eq!(handle.get().unwrap().beaches.len(), 2);
    }

    #[test]
    fn test_clones_share_the_dataset() {
        let handle = DatasetHandle::new();
        let reader = handle.clone();
        handle.publish(sample_dataset()).unwrap();

        assert!(matches!(reader.state(), LoadState::Ready(_)));
    }

    #[test]
    fn test_source_selection() {
        let timeout = Duration::from_secs(5);
        let http = source_for("https://example.com/data.json", timeout).unwrap();
        assert_eq!(http.describe(), "https://example.com/data.json");

        let file = source_for("data/travel_recommendation_api.json", timeout).unwrap();
        assert_eq!(file.describe(), "data/travel_recommendation_api.json");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_JSON.as_bytes()).unwrap();

        let handle = DatasetHandle::new();
        let dataset = load(&FileSource::new(file.path()), &handle).await.unwrap();

        assert_eq!(*dataset, sample_dataset());
        assert!(matches!(handle.state(), LoadState::Ready(_)));
    }

    #[tokio::test]
    async fn test_missing_file_records_failure() {
        let dir = tempfile::tempdir().unwrap();
        let handle = DatasetHandle::new();

        let err = load(&FileSource::new(dir.path().join("nope.json")), &handle)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Io(_)));
        assert!(matches!(handle.state(), LoadState::Failed(_)));
        assert!(handle.get().is_none());
    }

    #[tokio::test]
    async fn test_load_over_http() {
        let base = serve(test_router()).await;
        let source = HttpSource::new(&format!("{base}/travel_recommendation_api.json"), Duration::from_secs(5)).unwrap();

        let handle = DatasetHandle::new();
        let dataset = load(&source, &handle).await.unwrap();
        assert_eq!(dataset.sizes(), (2, 2, 8));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let base = serve(test_router()).await;
        let source = HttpSource::new(&format!("{base}/missing.json"), Duration::from_secs(5)).unwrap();

        let handle = DatasetHandle::new();
        let err = load(&source, &handle).await.unwrap_err();

        assert_eq!(err, LoadError::Status(404));
        match handle.state() {
            LoadState::Failed(reason) => assert!(reason.contains("404")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_parse_error() {
        let base = serve(test_router()).await;
        let source = HttpSource::new(&format!("{base}/broken.json"), Duration::from_secs(5)).unwrap();

        let err = load(&source, &DatasetHandle::new()).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_spawn_load_publishes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_JSON.as_bytes()).unwrap();

        let handle = DatasetHandle::new();
        spawn_load(Box::new(FileSource::new(file.path())), handle.clone())
            .await
            .unwrap();

        assert!(handle.get().is_some());
    }
}
