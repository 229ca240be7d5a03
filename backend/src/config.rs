use crate::AppState;
use anyhow::{anyhow, Result};
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;

lazy_static! {
    pub static ref SUPABASE_URL: String =
        env::var("SUPABASE_URL").unwrap_or_else(|_| "http://localhost:54321".to_string());
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

// Credentials are resolved per request so a missing key surfaces as a
// configuration error in the response instead of aborting the process.
pub fn youtube_api_key() -> Result<String> {
    env::var("YOUTUBE_API_KEY").map_err(|_| anyhow!("YouTube API key not configured"))
}

pub fn openai_api_key() -> Result<String> {
    env::var("OPENAI_API_KEY").map_err(|_| anyhow!("OpenAI API key not configured"))
}

pub fn supabase_service_key() -> Result<String> {
    env::var("SUPABASE_SERVICE_ROLE_KEY")
        .map_err(|_| anyhow!("Supabase service role key not configured"))
}

pub fn create_app_state() -> AppState {
    AppState {
        http: reqwest::Client::new(),
    }
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&[
            "Authorization",
            "Accept",
            "Content-Type",
            "x-client-info",
            "apikey",
        ]))
        .to_cors()
        .map_err(|e| anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
