#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use crate::config::{create_app_state, create_cors, init_logger, load_environment};
use crate::models::ErrorResponse;

pub struct AppState {
    pub http: reqwest::Client,
}

#[catch(422)]
fn unprocessable() -> ErrorResponse {
    ErrorResponse::new("Malformed request body")
}

#[catch(404)]
fn not_found() -> ErrorResponse {
    ErrorResponse::new("Resource not found")
}

#[launch]
fn rocket() -> _ {
    load_environment();
    init_logger();

    let cors = create_cors().expect("Failed to create CORS options");

    rocket::build()
        .manage(create_app_state())
        .attach(cors)
        .register("/", catchers![unprocessable, not_found])
        .mount("/video", routes![api::ingest_video, api::list_videos])
        .mount("/channel", routes![api::ingest_channel])
        .mount("/transcript", routes![api::generate_transcript])
        .mount("/chat", routes![api::chat_turn])
        .mount("/search", routes![api::search_library])
        .mount("/analysis", routes![api::analyze_theory])
}
