use log::info;
use serde::Serialize;

use crate::context::UserInfo;
use crate::core::models::{
    common::RewardPolicy,
    response::{Insert as ResponseInsert, Response, Tally},
    survey::SurveyStatus,
};
use crate::core::ports::repository::{AccountCommon, ResponseCommon, Store, SurveyCommon, TxStore};
use crate::error::Error;

#[derive(Debug, Clone, Serialize)]
pub struct SubmitReceipt {
    pub response_id: i32,
    pub reward_cents: i64,
    pub balance_cents: i64,
}

/// The one correctness-sensitive transaction: record the response, credit
/// the respondent, and complete the survey when the quota is reached, all
/// inside the same transaction. The survey row lock serializes racing
/// submissions, so two callers can never both take the last slot.
pub async fn submit_answer<T>(mut tx: T, user: &UserInfo, policy: &RewardPolicy, survey_id: i32, chosen_option: String) -> Result<SubmitReceipt, Error>
where
    T: TxStore,
{
    let survey = SurveyCommon::get_for_update(&mut tx, survey_id).await?;
    match survey.status {
        SurveyStatus::Active => {}
        SurveyStatus::Inactive => return Err(Error::SurveyInactive),
        SurveyStatus::Complete => return Err(Error::QuotaExceeded),
    }
    if !survey.options.contains(&chosen_option) {
        return Err(Error::Validation("chosen option is not part of this survey".into()));
    }
    if ResponseCommon::exists(&mut tx, survey_id, &user.id).await? {
        return Err(Error::DuplicateResponse);
    }
    let answered = ResponseCommon::count(&mut tx, survey_id).await?;
    if answered >= survey.vote_quota as i64 {
        return Err(Error::QuotaExceeded);
    }
    let response_id = ResponseCommon::insert(
        &mut tx,
        ResponseInsert {
            survey_id,
            respondent_id: user.id.clone(),
            chosen_option,
        },
    )
    .await?;
    let balance = AccountCommon::credit(&mut tx, &user.id, policy.reward_cents).await?;
    if user.is_anonymous && balance > policy.anonymous_earnings_limit_cents {
        // returning before commit rolls the response and the credit back
        return Err(Error::AnonymousLimit("sign in to keep earning"));
    }
    if answered + 1 == survey.vote_quota as i64 {
        SurveyCommon::set_status(&mut tx, survey_id, SurveyStatus::Complete).await?;
    }
    tx.commit().await?;
    info!(
        "response {} recorded for survey {}, credited {} cents to {}",
        response_id, survey_id, policy.reward_cents, user.id
    );
    Ok(SubmitReceipt {
        response_id,
        reward_cents: policy.reward_cents,
        balance_cents: balance,
    })
}

/// The owner's raw view of who answered what, newest first.
pub async fn survey_responses<D>(db: &mut D, user: &UserInfo, survey_id: i32) -> Result<Vec<Response>, Error>
where
    D: Store,
{
    let survey = SurveyCommon::get(db, survey_id).await?;
    if survey.owner_id != user.id {
        return Err(Error::NotOwner);
    }
    ResponseCommon::list_by_survey(db, survey_id).await
}

/// Computed from the responses alone, so counts stay queryable after the
/// survey itself has been erased.
pub async fn tally<D>(db: &mut D, survey_id: i32) -> Result<Tally, Error>
where
    D: Store,
{
    let counts = ResponseCommon::tally(db, survey_id).await?;
    let total = counts.iter().map(|c| c.count).sum();
    Ok(Tally { counts, total })
}
