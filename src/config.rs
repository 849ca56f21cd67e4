use crate::core::models::common::RewardPolicy;
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_port: u16,
    pub jwt_secret: Vec<u8>,
    pub policy: RewardPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let defaults = RewardPolicy::default();
        Ok(Self {
            database_url: dotenv::var("DATABASE_URL")?,
            listen_port: match dotenv::var("PORT") {
                Ok(v) => v.parse()?,
                Err(_) => 8000,
            },
            jwt_secret: dotenv::var("JWT_SECRET")?.into_bytes(),
            policy: RewardPolicy {
                reward_cents: var_or("REWARD_CENTS", defaults.reward_cents)?,
                anonymous_earnings_limit_cents: var_or("ANONYMOUS_EARNINGS_LIMIT_CENTS", defaults.anonymous_earnings_limit_cents)?,
                anonymous_survey_limit: var_or("ANONYMOUS_SURVEY_LIMIT", defaults.anonymous_survey_limit)?,
            },
        })
    }
}

fn var_or(name: &str, default: i64) -> Result<i64, Error> {
    match dotenv::var(name) {
        Ok(v) => Ok(v.parse()?),
        Err(_) => Ok(default),
    }
}
