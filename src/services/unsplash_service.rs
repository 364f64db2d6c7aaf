use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fmt;
use url::form_urlencoded;

const UNSPLASH_API_URL: &str = "https://api.unsplash.com/search/photos";
const RESULTS_PER_PAGE: u32 = 10;
const MAX_IMAGE_URLS: usize = 3;

/// Best-effort photo sourcing. Implementations must never fail the caller:
/// a trip without photos is still a trip.
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    async fn search_photos(&self, query: &str) -> Vec<String>;
}

/// Space-join the non-empty terms, in order, and URL-encode the result.
/// Empty fields are skipped entirely so the query never carries blank tokens.
pub fn build_image_query(country: &str, interests: &str, travel_style: &str) -> String {
    let terms: Vec<&str> = [country, interests, travel_style]
        .into_iter()
        .filter(|term| !term.trim().is_empty())
        .collect();

    form_urlencoded::byte_serialize(terms.join(" ").as_bytes()).collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct UnsplashSearchResponse {
    pub results: Option<Vec<UnsplashPhoto>>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UnsplashPhoto {
    pub urls: Option<PhotoUrls>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PhotoUrls {
    pub regular: Option<String>,
}

/// First 3 results' full-size URLs, in service order. Results without a
/// resolvable URL are dropped, never carried as placeholders.
pub fn extract_image_urls(response: UnsplashSearchResponse) -> Vec<String> {
    if let Some(errors) = &response.errors {
        eprintln!("Unsplash API error: {:?}", errors);
    }

    response
        .results
        .unwrap_or_default()
        .into_iter()
        .take(MAX_IMAGE_URLS)
        .filter_map(|photo| photo.urls.and_then(|urls| urls.regular))
        .collect()
}

#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    pub access_key: String,
    pub api_url: String,
}

impl UnsplashConfig {
    pub fn from_env() -> Result<Self, UnsplashError> {
        let access_key = env::var("UNSPLASH_ACCESS_KEY").map_err(|_| {
            UnsplashError::EnvironmentError("UNSPLASH_ACCESS_KEY not set".to_string())
        })?;

        Ok(Self {
            access_key,
            api_url: UNSPLASH_API_URL.to_string(),
        })
    }
}

#[derive(Debug)]
pub enum UnsplashError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for UnsplashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsplashError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            UnsplashError::HttpError(err) => write!(f, "HTTP error: {}", err),
            UnsplashError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for UnsplashError {}

impl From<reqwest::Error> for UnsplashError {
    fn from(err: reqwest::Error) -> Self {
        UnsplashError::HttpError(err)
    }
}

#[derive(Clone)]
pub struct UnsplashService {
    client: Client,
    config: UnsplashConfig,
}

impl UnsplashService {
    pub fn new(config: UnsplashConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self, UnsplashError> {
        Ok(Self::new(UnsplashConfig::from_env()?))
    }

    async fn fetch_photos(&self, query: &str) -> Result<Vec<String>, UnsplashError> {
        // The query arrives already URL-encoded from build_image_query
        let url = format!(
            "{}?query={}&per_page={}&client_id={}",
            self.config.api_url, query, RESULTS_PER_PAGE, self.config.access_key
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UnsplashError::ResponseError(format!(
                "Photo search failed with status {}: {}",
                status, error_text
            )));
        }

        let body: UnsplashSearchResponse = response
            .json()
            .await
            .map_err(|e| UnsplashError::ResponseError(format!("Failed to parse response: {}", e)))?;

        Ok(extract_image_urls(body))
    }
}

#[async_trait]
impl PhotoSearch for UnsplashService {
    async fn search_photos(&self, query: &str) -> Vec<String> {
        match self.fetch_photos(query).await {
            Ok(urls) => urls,
            Err(e) => {
                eprintln!("Image search failed, continuing without photos: {}", e);
                Vec::new()
            }
        }
    }
}
