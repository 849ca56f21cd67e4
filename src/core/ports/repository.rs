use crate::core::models::{
    account::Account,
    common::Pagination,
    response::{Insert as ResponseInsert, OptionCount, Response},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, SurveyStatus, Update as SurveyUpdate},
};
use crate::error::Error;

pub trait AccountCommon {
    async fn get_or_create(&mut self, user_id: &str) -> Result<Account, Error>;
    /// Atomic increment, never read-modify-write; returns the balance
    /// after the credit so callers inside a transaction can decide on it.
    async fn credit(&mut self, user_id: &str, amount: i64) -> Result<i64, Error>;
}

pub trait SurveyCommon {
    async fn insert(&mut self, data: SurveyInsert) -> Result<i32, Error>;
    async fn get(&mut self, id: i32) -> Result<Survey, Error>;
    /// Same as `get` but takes the survey's row lock for the rest of the
    /// transaction. Every quota decision must go through this.
    async fn get_for_update(&mut self, id: i32) -> Result<Survey, Error>;
    async fn update(&mut self, id: i32, data: SurveyUpdate) -> Result<(), Error>;
    async fn set_status(&mut self, id: i32, status: SurveyStatus) -> Result<(), Error>;
    async fn add_quota(&mut self, id: i32, extra: i32) -> Result<(), Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error>;
    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error>;
}

pub trait ResponseCommon {
    async fn insert(&mut self, data: ResponseInsert) -> Result<i32, Error>;
    async fn count(&mut self, survey_id: i32) -> Result<i64, Error>;
    async fn exists(&mut self, survey_id: i32, respondent_id: &str) -> Result<bool, Error>;
    async fn list_by_survey(&mut self, survey_id: i32) -> Result<Vec<Response>, Error>;
    async fn tally(&mut self, survey_id: i32) -> Result<Vec<OptionCount>, Error>;
}

pub trait Common: AccountCommon + SurveyCommon + ResponseCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager<'m, S, T>
where
    S: Store,
    T: TxStore,
{
    async fn db(&'m self) -> Result<S, Error>;
    async fn tx(&'m self) -> Result<T, Error>;
}
