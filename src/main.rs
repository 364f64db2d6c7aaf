use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tripforge_api::db;
use tripforge_api::routes;
use tripforge_api::services::gemini_service::GeminiService;
use tripforge_api::services::trip_generation_service::TripGenerator;
use tripforge_api::services::trip_service::MongoTripStore;
use tripforge_api::services::unsplash_service::UnsplashService;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;

    let gemini = GeminiService::from_env().expect("GEMINI_API_KEY must be set");
    let unsplash = UnsplashService::from_env().expect("UNSPLASH_ACCESS_KEY must be set");
    let store = MongoTripStore::new(client.clone());
    let generator = TripGenerator::new(Arc::new(gemini), Arc::new(unsplash), Arc::new(store));

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(generator.clone()))
            .service(
                web::scope("/api").service(
                    web::scope("/trips")
                        .route("", web::post().to(routes::trip::create_trip))
                        .route("", web::get().to(routes::trip::get_all))
                        .route("/{id}", web::get().to(routes::trip::get_by_id)),
                ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
