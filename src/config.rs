use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Bearer token for staff/admin and cashier endpoints. Real identity
    /// management lives outside this service.
    pub staff_api_token: String,
    /// How long an unpaid hold blocks the calendar.
    pub hold_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            staff_api_token: env::var("STAFF_API_TOKEN").expect("STAFF_API_TOKEN must be set"),
            hold_minutes: env::var("HOLD_MINUTES")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("HOLD_MINUTES must be a number"),
        }
    }
}
