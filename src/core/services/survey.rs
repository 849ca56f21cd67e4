use log::info;

use crate::context::UserInfo;
use crate::core::models::{
    common::{Pagination, RewardPolicy},
    survey::{Create as SurveyCreate, Insert as SurveyInsert, Query as SurveyQuery, Survey, SurveyStatus, Update as SurveyUpdate},
};
use crate::core::ports::repository::{Store, SurveyCommon, TxStore};
use crate::error::Error;

/// What the owner pays for a quota of answers. Must use the same unit
/// rate the ledger pays out, or the economics stop balancing.
pub fn total_cost_cents(vote_quota: i32, unit_cents: i64) -> i64 {
    vote_quota as i64 * unit_cents
}

fn validate_fields(question: &str, options: &[String], pictures: &[String]) -> Result<(), Error> {
    if question.trim().is_empty() {
        return Err(Error::Validation("question must not be empty".into()));
    }
    if options.len() < 2 {
        return Err(Error::Validation("at least two options are required".into()));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(Error::Validation("options must not be empty".into()));
    }
    if pictures.len() > 2 {
        return Err(Error::Validation("at most two pictures are allowed".into()));
    }
    Ok(())
}

fn ensure_owner(survey: &Survey, user: &UserInfo) -> Result<(), Error> {
    if survey.owner_id != user.id {
        return Err(Error::NotOwner);
    }
    Ok(())
}

pub async fn create_survey<D>(db: &mut D, user: &UserInfo, policy: &RewardPolicy, data: SurveyCreate) -> Result<i32, Error>
where
    D: Store,
{
    validate_fields(&data.question, &data.options, &data.pictures)?;
    if data.vote_quota <= 0 {
        return Err(Error::Validation("vote quota must be positive".into()));
    }
    if user.is_anonymous {
        let owned = SurveyCommon::count(
            db,
            &SurveyQuery {
                owner_id_eq: Some(user.id.clone()),
                ..Default::default()
            },
        )
        .await?;
        if owned >= policy.anonymous_survey_limit {
            return Err(Error::AnonymousLimit("sign in to create more surveys"));
        }
    }
    let id = SurveyCommon::insert(
        db,
        SurveyInsert {
            owner_id: user.id.clone(),
            question: data.question,
            kind: data.kind,
            options: data.options,
            pictures: data.pictures,
            link: data.link,
            vote_quota: data.vote_quota,
        },
    )
    .await?;
    info!("survey {} created by {}", id, user.id);
    Ok(id)
}

pub async fn survey_detail<D>(db: &mut D, id: i32) -> Result<Survey, Error>
where
    D: Store,
{
    SurveyCommon::get(db, id).await
}

pub async fn update_survey<D>(db: &mut D, user: &UserInfo, id: i32, data: SurveyUpdate) -> Result<(), Error>
where
    D: Store,
{
    validate_fields(&data.question, &data.options, &data.pictures)?;
    let survey = SurveyCommon::get(db, id).await?;
    ensure_owner(&survey, user)?;
    SurveyCommon::update(db, id, data).await
}

/// Owner pause/resume. `Complete` is terminal for this path; only a quota
/// increase reopens a survey that reached its quota.
pub async fn set_active<T>(mut tx: T, user: &UserInfo, id: i32, active: bool) -> Result<(), Error>
where
    T: TxStore,
{
    let survey = SurveyCommon::get_for_update(&mut tx, id).await?;
    ensure_owner(&survey, user)?;
    let next = match (survey.status, active) {
        (SurveyStatus::Complete, _) => return Err(Error::QuotaExceeded),
        (SurveyStatus::Active, false) => Some(SurveyStatus::Inactive),
        (SurveyStatus::Inactive, true) => Some(SurveyStatus::Active),
        // already in the requested state
        _ => None,
    };
    if let Some(status) = next {
        SurveyCommon::set_status(&mut tx, id, status).await?;
    }
    tx.commit().await
}

pub async fn increase_quota<T>(mut tx: T, user: &UserInfo, id: i32, extra: i32) -> Result<(), Error>
where
    T: TxStore,
{
    if extra <= 0 {
        return Err(Error::Validation("additional votes must be positive".into()));
    }
    let survey = SurveyCommon::get_for_update(&mut tx, id).await?;
    ensure_owner(&survey, user)?;
    SurveyCommon::add_quota(&mut tx, id, extra).await?;
    if survey.status != SurveyStatus::Active {
        SurveyCommon::set_status(&mut tx, id, SurveyStatus::Active).await?;
    }
    tx.commit().await?;
    info!("survey {} reopened with {} additional votes", id, extra);
    Ok(())
}

pub async fn delete_survey<D>(db: &mut D, user: &UserInfo, id: i32) -> Result<(), Error>
where
    D: Store,
{
    let survey = SurveyCommon::get(db, id).await?;
    ensure_owner(&survey, user)?;
    SurveyCommon::delete(db, id).await
}

pub async fn list_active<D>(db: &mut D, pagination: Option<Pagination>) -> Result<(Vec<Survey>, i64), Error>
where
    D: Store,
{
    let query = SurveyQuery {
        status_eq: Some(SurveyStatus::Active),
        ..Default::default()
    };
    let total = SurveyCommon::count(db, &query).await?;
    let surveys = SurveyCommon::query(db, &query, pagination).await?;
    Ok((surveys, total))
}

pub async fn list_by_owner<D>(db: &mut D, user: &UserInfo, pagination: Option<Pagination>) -> Result<(Vec<Survey>, i64), Error>
where
    D: Store,
{
    let query = SurveyQuery {
        owner_id_eq: Some(user.id.clone()),
        ..Default::default()
    };
    let total = SurveyCommon::count(db, &query).await?;
    let surveys = SurveyCommon::query(db, &query, pagination).await?;
    Ok((surveys, total))
}
