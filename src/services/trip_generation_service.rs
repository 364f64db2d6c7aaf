use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::models::trip::{GeneratedItinerary, TripRequest};
use crate::services::gemini_service::TextGenerator;
use crate::services::trip_service::TripStore;
use crate::services::unsplash_service::{build_image_query, PhotoSearch};

/// Render the request into a single-turn instruction plus the exact JSON
/// shape the model must fill in. Markdown is forbidden up front; the parser
/// still tolerates it when the model ignores that.
pub fn build_prompt(request: &TripRequest) -> String {
    format!(
        r#"Generate a {days}-day travel itinerary for {country} based on the following user information:
Budget: '{budget}'
Interests: '{interests}'
TravelStyle: '{travel_style}'
GroupType: '{group_type}'
Return the itinerary and lowest estimated price in a clean, non-markdown JSON format with the following structure:
{{
  "name": "...",
  "description": "...",
  "estimatedPrice": "...",
  "duration": {days},
  "budget": "{budget}",
  "travelStyle": "{travel_style}",
  "country": "{country}",
  "interests": "{interests}",
  "groupType": "{group_type}",
  "bestTimeToVisit": [...],
  "weatherInfo": [...],
  "location": {{
    "city": "...",
    "coordinates": [...],
    "openStreetMap": "..."
  }},
  "itinerary": [
    {{
      "day": 1,
      "location": "...",
      "activities": [
        {{ "time": "...", "description": "..." }}
      ]
    }}
  ]
}}"#,
        days = request.number_of_days,
        country = request.country,
        budget = request.budget,
        interests = request.interests,
        travel_style = request.travel_style,
        group_type = request.group_type,
    )
}

/// Decode a model response into a typed itinerary. The response may arrive
/// as bare JSON, a fenced code block, or a fenced block surrounded by prose.
pub fn parse_markdown_json(raw: &str) -> Result<GeneratedItinerary, serde_json::Error> {
    serde_json::from_str(extract_json_payload(raw))
}

fn extract_json_payload(raw: &str) -> &str {
    match raw.find("```") {
        Some(start) => {
            let body = &raw[start + 3..];
            // the opening fence may carry a language tag
            let body = body.strip_prefix("json").unwrap_or(body);
            match body.find("```") {
                Some(end) => body[..end].trim(),
                None => body.trim(),
            }
        }
        None => raw.trim(),
    }
}

#[derive(Debug)]
pub enum TripGenerationError {
    Generation(Box<dyn Error + Send + Sync>),
    Parse {
        raw: String,
        source: serde_json::Error,
    },
    Persistence(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for TripGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripGenerationError::Generation(err) => write!(f, "Text generation failed: {}", err),
            TripGenerationError::Parse { source, .. } => {
                write!(f, "Malformed model response: {}", source)
            }
            TripGenerationError::Persistence(err) => {
                write!(f, "Failed to persist trip: {}", err)
            }
        }
    }
}

impl Error for TripGenerationError {}

/// Sequences one trip-creation run: prompt, generate, parse, source photos,
/// persist. Photo sourcing can only degrade the result, never abort it; the
/// other stages surface their failures untouched and unretried.
#[derive(Clone)]
pub struct TripGenerator {
    generator: Arc<dyn TextGenerator>,
    photos: Arc<dyn PhotoSearch>,
    store: Arc<dyn TripStore>,
}

impl TripGenerator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        photos: Arc<dyn PhotoSearch>,
        store: Arc<dyn TripStore>,
    ) -> Self {
        Self {
            generator,
            photos,
            store,
        }
    }

    pub async fn generate_trip(&self, request: &TripRequest) -> Result<String, TripGenerationError> {
        let prompt = build_prompt(request);

        let raw = self
            .generator
            .generate_content(&prompt)
            .await
            .map_err(TripGenerationError::Generation)?;

        let itinerary = parse_markdown_json(&raw).map_err(|source| TripGenerationError::Parse {
            raw: raw.clone(),
            source,
        })?;

        let query = build_image_query(&request.country, &request.interests, &request.travel_style);
        println!("Image search query: {}", query);
        let image_urls = self.photos.search_photos(&query).await;

        let trip_detail = serde_json::to_string(&itinerary)
            .map_err(|e| TripGenerationError::Persistence(Box::new(e)))?;

        self.store
            .create_trip(trip_detail, image_urls, request.user_id.clone())
            .await
            .map_err(TripGenerationError::Persistence)
    }
}
