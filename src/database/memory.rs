use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core::models::{
    account::Account,
    common::Pagination,
    response::{Insert as ResponseInsert, OptionCount, Response},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, SurveyStatus, Update as SurveyUpdate},
};
use crate::core::ports::repository::{AccountCommon, Common, Manager, ResponseCommon, Store, SurveyCommon, TxStore};
use crate::error::Error;

#[derive(Debug, Clone, Default)]
struct State {
    accounts: HashMap<String, i64>,
    surveys: HashMap<i32, Survey>,
    responses: Vec<Response>,
    next_survey_id: i32,
    next_response_id: i32,
}

fn matches(survey: &Survey, query: &SurveyQuery) -> bool {
    query.owner_id_eq.as_deref().map_or(true, |o| survey.owner_id == o)
        && query.status_eq.map_or(true, |s| survey.status == s)
}

/// In-memory stand-in for the Postgres adapter used by the service tests.
/// A transaction holds the state lock for its whole lifetime and publishes
/// its working copy on commit, so racing transactions serialize the same
/// way they do behind the real store's row locks.
#[derive(Clone)]
pub struct MemManager {
    state: Arc<Mutex<State>>,
}

impl MemManager {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    async fn lock(&self) -> MemTx {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        MemTx { guard, working }
    }
}

pub struct MemTx {
    guard: OwnedMutexGuard<State>,
    working: State,
}

impl AccountCommon for MemTx {
    async fn get_or_create(&mut self, user_id: &str) -> Result<Account, Error> {
        let balance = *self.working.accounts.entry(user_id.into()).or_insert(0);
        Ok(Account {
            user_id: user_id.into(),
            balance,
        })
    }

    async fn credit(&mut self, user_id: &str, amount: i64) -> Result<i64, Error> {
        let balance = self.working.accounts.entry(user_id.into()).or_insert(0);
        *balance += amount;
        Ok(*balance)
    }
}

impl SurveyCommon for MemTx {
    async fn insert(&mut self, data: SurveyInsert) -> Result<i32, Error> {
        self.working.next_survey_id += 1;
        let id = self.working.next_survey_id;
        self.working.surveys.insert(
            id,
            Survey {
                id,
                owner_id: data.owner_id,
                question: data.question,
                kind: data.kind,
                options: data.options,
                pictures: data.pictures,
                link: data.link,
                vote_quota: data.vote_quota,
                status: SurveyStatus::Active,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Survey, Error> {
        self.working.surveys.get(&id).cloned().ok_or(Error::NotFound("survey"))
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Survey, Error> {
        SurveyCommon::get(self, id).await
    }

    async fn update(&mut self, id: i32, data: SurveyUpdate) -> Result<(), Error> {
        let survey = self.working.surveys.get_mut(&id).ok_or(Error::NotFound("survey"))?;
        survey.question = data.question;
        survey.options = data.options;
        survey.pictures = data.pictures;
        survey.link = data.link;
        Ok(())
    }

    async fn set_status(&mut self, id: i32, status: SurveyStatus) -> Result<(), Error> {
        let survey = self.working.surveys.get_mut(&id).ok_or(Error::NotFound("survey"))?;
        survey.status = status;
        Ok(())
    }

    async fn add_quota(&mut self, id: i32, extra: i32) -> Result<(), Error> {
        let survey = self.working.surveys.get_mut(&id).ok_or(Error::NotFound("survey"))?;
        survey.vote_quota += extra;
        Ok(())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.working.surveys.remove(&id).ok_or(Error::NotFound("survey"))?;
        Ok(())
    }

    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error> {
        let mut surveys: Vec<Survey> = self.working.surveys.values().filter(|s| matches(s, query)).cloned().collect();
        surveys.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        if let Some(p) = pagination {
            surveys = surveys.into_iter().skip(p.offset() as usize).take(p.limit() as usize).collect();
        }
        Ok(surveys)
    }

    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error> {
        Ok(self.working.surveys.values().filter(|s| matches(s, query)).count() as i64)
    }
}

impl ResponseCommon for MemTx {
    async fn insert(&mut self, data: ResponseInsert) -> Result<i32, Error> {
        self.working.next_response_id += 1;
        let id = self.working.next_response_id;
        self.working.responses.push(Response {
            id,
            survey_id: data.survey_id,
            respondent_id: data.respondent_id,
            chosen_option: data.chosen_option,
            submitted_at: Utc::now(),
        });
        Ok(id)
    }

    async fn count(&mut self, survey_id: i32) -> Result<i64, Error> {
        Ok(self.working.responses.iter().filter(|r| r.survey_id == survey_id).count() as i64)
    }

    async fn exists(&mut self, survey_id: i32, respondent_id: &str) -> Result<bool, Error> {
        Ok(self
            .working
            .responses
            .iter()
            .any(|r| r.survey_id == survey_id && r.respondent_id == respondent_id))
    }

    async fn list_by_survey(&mut self, survey_id: i32) -> Result<Vec<Response>, Error> {
        let mut responses: Vec<Response> = self.working.responses.iter().filter(|r| r.survey_id == survey_id).cloned().collect();
        responses.sort_by(|a, b| (b.submitted_at, b.id).cmp(&(a.submitted_at, a.id)));
        Ok(responses)
    }

    async fn tally(&mut self, survey_id: i32) -> Result<Vec<OptionCount>, Error> {
        let mut by_option: HashMap<String, i64> = HashMap::new();
        for r in self.working.responses.iter().filter(|r| r.survey_id == survey_id) {
            *by_option.entry(r.chosen_option.clone()).or_insert(0) += 1;
        }
        let mut counts: Vec<OptionCount> = by_option.into_iter().map(|(option, count)| OptionCount { option, count }).collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.option.cmp(&b.option)));
        Ok(counts)
    }
}

impl Common for MemTx {}
impl Store for MemTx {}

impl TxStore for MemTx {
    async fn commit(self) -> Result<(), Error> {
        let MemTx { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}

impl<'m> Manager<'m, MemTx, MemTx> for MemManager {
    async fn db(&'m self) -> Result<MemTx, Error> {
        Ok(self.lock().await)
    }

    async fn tx(&'m self) -> Result<MemTx, Error> {
        Ok(self.lock().await)
    }
}
