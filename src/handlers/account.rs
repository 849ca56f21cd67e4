use actix_web::web::{Data, Json};
use serde::Serialize;

use crate::context::UserInfo;
use crate::core::models::common::format_cents;
use crate::core::ports::repository::Manager;
use crate::core::services::account;
use crate::database::sqlx::PgManager;
use crate::error::Error;

#[derive(Debug, Serialize)]
pub struct Balance {
    pub balance_cents: i64,
    pub balance: String,
}

pub async fn balance(user: UserInfo, manager: Data<PgManager>) -> Result<Json<Balance>, Error> {
    let mut db = manager.db().await?;
    let account = account::balance(&mut db, &user).await?;
    Ok(Json(Balance {
        balance_cents: account.balance,
        balance: format_cents(account.balance),
    }))
}
