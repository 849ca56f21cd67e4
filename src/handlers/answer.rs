use actix_web::web::{Data, Json, Path};
use serde::Deserialize;

use crate::config::Config;
use crate::context::UserInfo;
use crate::core::models::response::{Response, Tally};
use crate::core::ports::repository::Manager;
use crate::core::services::ledger::{self, SubmitReceipt};
use crate::database::sqlx::PgManager;
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct SubmitAnswer {
    pub option: String,
}

pub async fn submit(
    user: UserInfo,
    manager: Data<PgManager>,
    config: Data<Config>,
    survey_id: Path<(i32,)>,
    Json(body): Json<SubmitAnswer>,
) -> Result<Json<SubmitReceipt>, Error> {
    let tx = manager.tx().await?;
    let receipt = ledger::submit_answer(tx, &user, &config.policy, survey_id.into_inner().0, body.option).await?;
    Ok(Json(receipt))
}

pub async fn tally(manager: Data<PgManager>, survey_id: Path<(i32,)>) -> Result<Json<Tally>, Error> {
    let mut db = manager.db().await?;
    let tally = ledger::tally(&mut db, survey_id.into_inner().0).await?;
    Ok(Json(tally))
}

pub async fn responses(user: UserInfo, manager: Data<PgManager>, survey_id: Path<(i32,)>) -> Result<Json<Vec<Response>>, Error> {
    let mut db = manager.db().await?;
    let responses = ledger::survey_responses(&mut db, &user, survey_id.into_inner().0).await?;
    Ok(Json(responses))
}
