use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // seconds
}

impl JwtConfig {
    pub const DEFAULT_ACCESS_EXPIRY: i64 = 24 * 60 * 60;

    /// Load JWT configuration from environment variables
    pub fn from_env() -> Self {
        let secret_key = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        // HS256 wants at least 32 bytes of key material
        if secret_key.len() < 32 {
            panic!("JWT_SECRET must be at least 32 characters long for HS256 algorithm");
        }

        let access_token_expiry = env::var("JWT_ACCESS_EXPIRY")
            .ok()
            .map(|v| {
                v.parse::<i64>()
                    .unwrap_or_else(|_| panic!("Invalid JWT_ACCESS_EXPIRY value"))
            })
            .unwrap_or(Self::DEFAULT_ACCESS_EXPIRY);

        if access_token_expiry <= 0 {
            panic!("JWT_ACCESS_EXPIRY must be a positive number of seconds");
        }

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "bizdir".to_string());

        Self {
            secret_key,
            issuer,
            access_token_expiry,
        }
    }
}
