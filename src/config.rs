// config.rs
//
// Every environment variable the service consumes is read here, once, at
// process start. Routes never touch std::env directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub jwt_secret: String,
    pub port: u16,
    // Transactional email service
    pub resend_api_key: String,
    pub from_email: String,
    pub admin_email: String,
    // Object storage
    pub storage_url: String,
    pub storage_service_key: String,
    pub storage_bucket: String,
    pub log_level: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let app_url = std::env::var("APP_URL").expect("APP_URL must be set");

        let resend_api_key =
            std::env::var("RESEND_API_KEY").expect("RESEND_API_KEY must be set");
        let from_email = std::env::var("FROM_EMAIL")
            .unwrap_or_else(|_| "Casavela <onboarding@resend.dev>".to_string());
        let admin_email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set");

        let storage_url = std::env::var("STORAGE_URL").expect("STORAGE_URL must be set");
        let storage_service_key =
            std::env::var("STORAGE_SERVICE_KEY").expect("STORAGE_SERVICE_KEY must be set");
        let storage_bucket = std::env::var("STORAGE_BUCKET")
            .unwrap_or_else(|_| "property_images".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid port number");

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Config {
            database_url,
            app_url,
            jwt_secret,
            port,
            resend_api_key,
            from_email,
            admin_email,
            storage_url,
            storage_service_key,
            storage_bucket,
            log_level,
        }
    }
}
