use async_trait::async_trait;
use chrono::Utc;
use mongodb::{bson::oid::ObjectId, Client, Collection};
use std::error::Error;
use std::sync::Arc;

use crate::models::trip::TripDocument;

pub const TRIP_DATABASE: &str = "Trips";
pub const TRIP_COLLECTION: &str = "Generated";

/// Write-side of the trip collection: one create call per pipeline run.
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn create_trip(
        &self,
        trip_detail: String,
        image_urls: Vec<String>,
        user_id: String,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

pub struct MongoTripStore {
    client: Arc<Client>,
    database: String,
    collection: String,
}

impl MongoTripStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self::with_names(client, TRIP_DATABASE, TRIP_COLLECTION)
    }

    pub fn with_names(client: Arc<Client>, database: &str, collection: &str) -> Self {
        Self {
            client,
            database: database.to_string(),
            collection: collection.to_string(),
        }
    }

    fn collection(&self) -> Collection<TripDocument> {
        self.client
            .database(&self.database)
            .collection(&self.collection)
    }
}

#[async_trait]
impl TripStore for MongoTripStore {
    async fn create_trip(
        &self,
        trip_detail: String,
        image_urls: Vec<String>,
        user_id: String,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let id = ObjectId::new();
        let document = TripDocument {
            id: Some(id),
            trip_detail,
            image_urls,
            created_at: Utc::now().to_rfc3339(),
            user_id,
        };

        self.collection().insert_one(&document).await?;

        Ok(id.to_hex())
    }
}
