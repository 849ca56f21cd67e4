#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: i64,
    pub size: i64,
}

impl Pagination {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

/// Per-answer reward and the limits applied to anonymous callers.
/// Defaults: $0.10 per vote, $10.00 anonymous earnings cap, one survey
/// per anonymous creator.
#[derive(Debug, Clone)]
pub struct RewardPolicy {
    pub reward_cents: i64,
    pub anonymous_earnings_limit_cents: i64,
    pub anonymous_survey_limit: i64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            reward_cents: 10,
            anonymous_earnings_limit_cents: 1000,
            anonymous_survey_limit: 1,
        }
    }
}

/// Money is integer cents everywhere; this is the only place amounts are
/// turned into a display string.
pub fn format_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
