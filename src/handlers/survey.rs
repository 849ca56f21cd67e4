use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::context::UserInfo;
use crate::core::models::common::{format_cents, Pagination};
use crate::core::models::survey::{Create as SurveyCreate, Survey, Update as SurveyUpdate};
use crate::core::ports::repository::Manager;
use crate::core::services::survey;
use crate::database::sqlx::PgManager;
use crate::error::Error;
use crate::response::List;

#[derive(Debug, Deserialize)]
pub struct ListParam {
    page: Option<i64>,
    size: Option<i64>,
}

impl ListParam {
    fn pagination(&self) -> Option<Pagination> {
        match (self.page, self.size) {
            (Some(page), Some(size)) => Some(Pagination::new(page, size)),
            _ => None,
        }
    }
}

pub async fn list_active(manager: Data<PgManager>, param: Query<ListParam>) -> Result<Json<List<Survey>>, Error> {
    let mut db = manager.db().await?;
    let (surveys, total) = survey::list_active(&mut db, param.pagination()).await?;
    Ok(Json(List::new(surveys, total)))
}

pub async fn list_mine(user: UserInfo, manager: Data<PgManager>, param: Query<ListParam>) -> Result<Json<List<Survey>>, Error> {
    let mut db = manager.db().await?;
    let (surveys, total) = survey::list_by_owner(&mut db, &user, param.pagination()).await?;
    Ok(Json(List::new(surveys, total)))
}

#[derive(Debug, Serialize)]
pub struct CreationResponse {
    pub id: i32,
}

pub async fn create(
    user: UserInfo,
    manager: Data<PgManager>,
    config: Data<Config>,
    Json(data): Json<SurveyCreate>,
) -> Result<Json<CreationResponse>, Error> {
    let mut db = manager.db().await?;
    let id = survey::create_survey(&mut db, &user, &config.policy, data).await?;
    Ok(Json(CreationResponse { id }))
}

pub async fn detail(manager: Data<PgManager>, survey_id: Path<(i32,)>) -> Result<Json<Survey>, Error> {
    let mut db = manager.db().await?;
    let survey = survey::survey_detail(&mut db, survey_id.into_inner().0).await?;
    Ok(Json(survey))
}

pub async fn update(
    user: UserInfo,
    manager: Data<PgManager>,
    survey_id: Path<(i32,)>,
    Json(data): Json<SurveyUpdate>,
) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    survey::update_survey(&mut db, &user, survey_id.into_inner().0, data).await?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn erase(user: UserInfo, manager: Data<PgManager>, survey_id: Path<(i32,)>) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    survey::delete_survey(&mut db, &user, survey_id.into_inner().0).await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
pub struct SetActive {
    pub active: bool,
}

pub async fn set_active(
    user: UserInfo,
    manager: Data<PgManager>,
    survey_id: Path<(i32,)>,
    Json(body): Json<SetActive>,
) -> Result<HttpResponse, Error> {
    let tx = manager.tx().await?;
    survey::set_active(tx, &user, survey_id.into_inner().0, body.active).await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
pub struct IncreaseQuota {
    pub additional_votes: i32,
}

pub async fn increase_quota(
    user: UserInfo,
    manager: Data<PgManager>,
    survey_id: Path<(i32,)>,
    Json(body): Json<IncreaseQuota>,
) -> Result<HttpResponse, Error> {
    let tx = manager.tx().await?;
    survey::increase_quota(tx, &user, survey_id.into_inner().0, body.additional_votes).await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
pub struct QuoteParam {
    pub votes: i32,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub votes: i32,
    pub unit_cost: String,
    pub total_cost: String,
}

/// Creator-side payment preview; presentation only, nothing is charged.
pub async fn quote(config: Data<Config>, param: Query<QuoteParam>) -> Result<Json<QuoteResponse>, Error> {
    if param.votes <= 0 {
        return Err(Error::Validation("votes must be positive".into()));
    }
    let unit = config.policy.reward_cents;
    Ok(Json(QuoteResponse {
        votes: param.votes,
        unit_cost: format_cents(unit),
        total_cost: format_cents(survey::total_cost_cents(param.votes, unit)),
    }))
}
