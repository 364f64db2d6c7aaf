use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Incoming trip-creation request. Field names follow the dashboard's
/// camelCase wire format.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripRequest {
    pub country: String,
    #[serde(rename = "numberOfDays")]
    pub number_of_days: u32,
    #[serde(rename = "travelStyle")]
    pub travel_style: String,
    pub interests: String,
    pub budget: String,
    #[serde(rename = "groupType")]
    pub group_type: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// The itinerary the model is asked to produce. Decoding the model output
/// into this shape is what separates a usable response from a malformed one.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeneratedItinerary {
    pub name: String,
    pub description: String,
    #[serde(rename = "estimatedPrice")]
    pub estimated_price: String,
    pub duration: u32,
    pub budget: String,
    #[serde(rename = "travelStyle")]
    pub travel_style: String,
    pub country: String,
    pub interests: String,
    #[serde(rename = "groupType")]
    pub group_type: String,
    #[serde(rename = "bestTimeToVisit")]
    pub best_time_to_visit: Vec<String>,
    #[serde(rename = "weatherInfo")]
    pub weather_info: Vec<String>,
    pub location: ItineraryLocation,
    pub itinerary: Vec<ItineraryDay>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryLocation {
    pub city: String,
    pub coordinates: Vec<f64>,
    #[serde(rename = "openStreetMap")]
    pub open_street_map: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryDay {
    pub day: u32,
    pub location: String,
    pub activities: Vec<DayActivity>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayActivity {
    pub time: String,
    pub description: String,
}

/// Persisted record, one per successful pipeline run. The itinerary is kept
/// as an opaque serialized blob; the dashboard parses it client-side.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "tripDetail")]
    pub trip_detail: String,
    #[serde(rename = "imageUrls")]
    pub image_urls: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreateTripResponse {
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
