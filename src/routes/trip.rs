use crate::models::trip::{CreateTripResponse, ErrorResponse, TripDocument, TripRequest};
use crate::services::trip_generation_service::{TripGenerationError, TripGenerator};
use crate::services::trip_service::{TRIP_COLLECTION, TRIP_DATABASE};
use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use futures::TryStreamExt;
use mongodb::{bson::oid::ObjectId, Client};
use std::sync::Arc;

/*
    POST /api/trips
*/
pub async fn create_trip(
    data: web::Data<TripGenerator>,
    input: web::Json<TripRequest>,
) -> impl Responder {
    let request = input.into_inner();

    if let Err(message) = validate_request(&request) {
        return HttpResponse::BadRequest().json(ErrorResponse { error: message });
    }

    match data.generate_trip(&request).await {
        Ok(id) => HttpResponse::Ok().json(CreateTripResponse { id }),
        Err(TripGenerationError::Parse { raw, source }) => {
            eprintln!("Failed to parse model response: {}", source);
            eprintln!("Raw model response: {}", raw);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Invalid AI response. Try again.".to_string(),
            })
        }
        Err(err) => {
            eprintln!("Error generating travel plan: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Server error while generating trip.".to_string(),
            })
        }
    }
}

// Field presence and typing are serde's job at the Json extractor; this only
// rejects values serde cannot see are unusable.
fn validate_request(request: &TripRequest) -> Result<(), String> {
    if request.country.trim().is_empty() {
        return Err("country must not be empty".to_string());
    }
    if request.number_of_days == 0 {
        return Err("numberOfDays must be at least 1".to_string());
    }
    if request.user_id.trim().is_empty() {
        return Err("userId must not be empty".to_string());
    }

    Ok(())
}

/*
    GET /api/trips
*/
pub async fn get_all(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = client
        .database(TRIP_DATABASE)
        .collection::<TripDocument>(TRIP_COLLECTION);

    let cursor = collection
        .find(doc! {})
        .sort(doc! { "createdAt": -1 })
        .limit(100)
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<TripDocument>>().await {
            Ok(trips) => HttpResponse::Ok().json(trips),
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve trips")
            }
        },
        Err(err) => {
            eprintln!("Failed to find documents: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trips")
        }
    }
}

/*
    GET /api/trips/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = client
        .database(TRIP_DATABASE)
        .collection::<TripDocument>(TRIP_COLLECTION);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}
