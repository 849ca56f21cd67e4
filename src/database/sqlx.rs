use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder, Transaction};

use crate::core::models::{
    account::Account,
    common::Pagination,
    response::{Insert as ResponseInsert, OptionCount, Response},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, SurveyStatus, Update as SurveyUpdate},
};
use crate::core::ports::repository::{AccountCommon, Common, Manager, ResponseCommon, Store, SurveyCommon, TxStore};
use crate::error::Error;

pub struct PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    executor: E,
}

impl<E> PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> AccountCommon for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn get_or_create(&mut self, user_id: &str) -> Result<Account, Error> {
        query("INSERT INTO accounts (user_id, balance) VALUES ($1, 0) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut self.executor)
            .await?;
        let account = query_as("SELECT * FROM accounts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(account)
    }

    async fn credit(&mut self, user_id: &str, amount: i64) -> Result<i64, Error> {
        let balance = query_scalar(
            "INSERT INTO accounts (user_id, balance) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET balance = accounts.balance + EXCLUDED.balance
             RETURNING balance",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(balance)
    }
}

impl<E> SurveyCommon for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: SurveyInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO surveys (owner_id, question, kind, options, pictures, link, vote_quota)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(data.owner_id)
        .bind(data.question)
        .bind(data.kind)
        .bind(data.options)
        .bind(data.pictures)
        .bind(data.link)
        .bind(data.vote_quota)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Survey, Error> {
        query_as("SELECT * FROM surveys WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?
            .ok_or(Error::NotFound("survey"))
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Survey, Error> {
        query_as("SELECT * FROM surveys WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?
            .ok_or(Error::NotFound("survey"))
    }

    async fn update(&mut self, id: i32, data: SurveyUpdate) -> Result<(), Error> {
        query("UPDATE surveys SET question = $1, options = $2, pictures = $3, link = $4 WHERE id = $5")
            .bind(data.question)
            .bind(data.options)
            .bind(data.pictures)
            .bind(data.link)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn set_status(&mut self, id: i32, status: SurveyStatus) -> Result<(), Error> {
        query("UPDATE surveys SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn add_quota(&mut self, id: i32, extra: i32) -> Result<(), Error> {
        query("UPDATE surveys SET vote_quota = vote_quota + $1 WHERE id = $2")
            .bind(extra)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        query("DELETE FROM surveys WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(())
    }

    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM surveys WHERE 1 = 1");
        if let Some(owner) = &query.owner_id_eq {
            stmt.push(" AND owner_id = ").push_bind(owner.clone());
        }
        if let Some(status) = query.status_eq {
            stmt.push(" AND status = ").push_bind(status);
        }
        stmt.push(" ORDER BY created_at DESC, id DESC");
        if let Some(p) = pagination {
            stmt.push(" LIMIT ").push_bind(p.limit());
            stmt.push(" OFFSET ").push_bind(p.offset());
        }
        let surveys = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(surveys)
    }

    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error> {
        let mut stmt = QueryBuilder::new("SELECT COUNT(*) FROM surveys WHERE 1 = 1");
        if let Some(owner) = &query.owner_id_eq {
            stmt.push(" AND owner_id = ").push_bind(owner.clone());
        }
        if let Some(status) = query.status_eq {
            stmt.push(" AND status = ").push_bind(status);
        }
        let (n,) = stmt.build_query_as().fetch_one(&mut self.executor).await?;
        Ok(n)
    }
}

impl<E> ResponseCommon for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: ResponseInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO responses (survey_id, respondent_id, chosen_option) VALUES ($1, $2, $3) RETURNING id")
            .bind(data.survey_id)
            .bind(data.respondent_id)
            .bind(data.chosen_option)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn count(&mut self, survey_id: i32) -> Result<i64, Error> {
        let n = query_scalar("SELECT COUNT(*) FROM responses WHERE survey_id = $1")
            .bind(survey_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(n)
    }

    async fn exists(&mut self, survey_id: i32, respondent_id: &str) -> Result<bool, Error> {
        let exists = query_scalar("SELECT EXISTS(SELECT * FROM responses WHERE survey_id = $1 AND respondent_id = $2)")
            .bind(survey_id)
            .bind(respondent_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(exists)
    }

    async fn list_by_survey(&mut self, survey_id: i32) -> Result<Vec<Response>, Error> {
        let responses = query_as("SELECT * FROM responses WHERE survey_id = $1 ORDER BY submitted_at DESC, id DESC")
            .bind(survey_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(responses)
    }

    async fn tally(&mut self, survey_id: i32) -> Result<Vec<OptionCount>, Error> {
        let counts = query_as(
            "SELECT chosen_option AS option, COUNT(*) AS count
             FROM responses
             WHERE survey_id = $1
             GROUP BY chosen_option
             ORDER BY count DESC, option ASC",
        )
        .bind(survey_id)
        .fetch_all(&mut self.executor)
        .await?;
        Ok(counts)
    }
}

impl Common for PgStore<PoolConnection<Postgres>> {}
impl Common for PgStore<Transaction<'static, Postgres>> {}
impl Store for PgStore<PoolConnection<Postgres>> {}
impl Store for PgStore<Transaction<'static, Postgres>> {}

impl TxStore for PgStore<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

pub struct PgManager {
    pool: PgPool,
}

impl PgManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'m> Manager<'m, PgStore<PoolConnection<Postgres>>, PgStore<Transaction<'static, Postgres>>> for PgManager {
    async fn db(&'m self) -> Result<PgStore<PoolConnection<Postgres>>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgStore::new(conn))
    }

    async fn tx(&'m self) -> Result<PgStore<Transaction<'static, Postgres>>, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgStore::new(tx))
    }
}
