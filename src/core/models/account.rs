use serde::Serialize;
use sqlx::FromRow;

/// Created lazily on first read or first credit; balance never goes
/// negative (there is no debit path, withdrawals are a separate feature).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub user_id: String,
    pub balance: i64,
}
