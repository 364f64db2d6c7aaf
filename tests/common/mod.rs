use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{web, App};
use async_trait::async_trait;

use tripforge_api::models::trip::TripRequest;
use tripforge_api::routes;
use tripforge_api::services::gemini_service::TextGenerator;
use tripforge_api::services::trip_generation_service::TripGenerator;
use tripforge_api::services::trip_service::TripStore;
use tripforge_api::services::unsplash_service::{
    extract_image_urls, PhotoSearch, PhotoUrls, UnsplashPhoto, UnsplashSearchResponse,
};

pub struct MockGenerator {
    pub response: String,
    pub fail: bool,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate_content(
        &self,
        _prompt: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err("text generation unavailable".into());
        }

        Ok(self.response.clone())
    }
}

// Feeds canned service results through the real extraction path so route
// tests exercise the same slicing/filtering as production.
pub struct MockPhotoSearch {
    pub results: Vec<UnsplashPhoto>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PhotoSearch for MockPhotoSearch {
    async fn search_photos(&self, _query: &str) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        extract_image_urls(UnsplashSearchResponse {
            results: Some(self.results.clone()),
            errors: None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SavedTrip {
    pub trip_detail: String,
    pub image_urls: Vec<String>,
    pub user_id: String,
}

pub struct MockTripStore {
    pub fail: bool,
    pub saved: Arc<Mutex<Vec<SavedTrip>>>,
}

#[async_trait]
impl TripStore for MockTripStore {
    async fn create_trip(
        &self,
        trip_detail: String,
        image_urls: Vec<String>,
        user_id: String,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        if self.fail {
            return Err("document store rejected the create call".into());
        }

        self.saved.lock().unwrap().push(SavedTrip {
            trip_detail,
            image_urls,
            user_id,
        });

        Ok("665b3f0c9d5e4a2b1c8d7e6f".to_string())
    }
}

pub struct TestPipeline {
    pub pipeline: TripGenerator,
    pub generator_calls: Arc<AtomicUsize>,
    pub search_calls: Arc<AtomicUsize>,
    pub saved: Arc<Mutex<Vec<SavedTrip>>>,
}

pub fn build_pipeline(
    response: &str,
    generator_fails: bool,
    photos: Vec<UnsplashPhoto>,
    store_fails: bool,
) -> TestPipeline {
    let generator_calls = Arc::new(AtomicUsize::new(0));
    let search_calls = Arc::new(AtomicUsize::new(0));
    let saved = Arc::new(Mutex::new(Vec::new()));

    let pipeline = TripGenerator::new(
        Arc::new(MockGenerator {
            response: response.to_string(),
            fail: generator_fails,
            calls: generator_calls.clone(),
        }),
        Arc::new(MockPhotoSearch {
            results: photos,
            calls: search_calls.clone(),
        }),
        Arc::new(MockTripStore {
            fail: store_fails,
            saved: saved.clone(),
        }),
    );

    TestPipeline {
        pipeline,
        generator_calls,
        search_calls,
        saved,
    }
}

pub fn create_app(
    pipeline: TripGenerator,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(pipeline)).service(
        web::scope("/api").service(
            web::scope("/trips").route("", web::post().to(routes::trip::create_trip)),
        ),
    )
}

pub fn photo(url: Option<&str>) -> UnsplashPhoto {
    UnsplashPhoto {
        urls: Some(PhotoUrls {
            regular: url.map(|u| u.to_string()),
        }),
    }
}

pub fn sample_photos(count: usize) -> Vec<UnsplashPhoto> {
    (1..=count)
        .map(|i| photo(Some(format!("https://images.example.com/photo-{}.jpg", i).as_str())))
        .collect()
}

pub fn sample_request() -> serde_json::Value {
    serde_json::json!({
        "country": "Italy",
        "numberOfDays": 3,
        "travelStyle": "relaxed",
        "interests": "art,food",
        "budget": "medium",
        "groupType": "couple",
        "userId": "u1"
    })
}

pub fn sample_trip_request() -> TripRequest {
    serde_json::from_value(sample_request()).unwrap()
}

pub fn valid_itinerary_json() -> String {
    serde_json::json!({
        "name": "Roman Holiday, Unhurried",
        "description": "Three slow days through Rome's galleries, piazzas and trattorias.",
        "estimatedPrice": "$1,150",
        "duration": 3,
        "budget": "medium",
        "travelStyle": "relaxed",
        "country": "Italy",
        "interests": "art,food",
        "groupType": "couple",
        "bestTimeToVisit": ["April to June", "September to October"],
        "weatherInfo": ["Spring: 12-22C", "Autumn: 14-24C"],
        "location": {
            "city": "Rome",
            "coordinates": [41.9028, 12.4964],
            "openStreetMap": "https://www.openstreetmap.org/relation/41485"
        },
        "itinerary": [
            {
                "day": 1,
                "location": "Rome",
                "activities": [
                    { "time": "Morning", "description": "Borghese Gallery, booked ahead" },
                    { "time": "Evening", "description": "Dinner in Trastevere" }
                ]
            },
            {
                "day": 2,
                "location": "Rome",
                "activities": [
                    { "time": "Morning", "description": "Vatican Museums and the Sistine Chapel" },
                    { "time": "Afternoon", "description": "Espresso crawl around Sant'Eustachio" }
                ]
            },
            {
                "day": 3,
                "location": "Rome",
                "activities": [
                    { "time": "Morning", "description": "Campo de' Fiori market and cooking class" }
                ]
            }
        ]
    })
    .to_string()
}

pub fn fenced(json: &str) -> String {
    format!("```json\n{}\n```", json)
}
