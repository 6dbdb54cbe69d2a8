use crate::db::models::DbPage;
use crate::db::patch::{DbPatchable, PageCreate, PagePatch, PagePatchById};
use crate::db::schema::SQLITE_INIT;
use crate::error::PagewrightError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a page row and return its id.
    Create(PageCreate, RpcReplyPort<Result<i64, PagewrightError>>),

    /// Patch a page row by id.
    Patch(PagePatchById, RpcReplyPort<Result<(), PagewrightError>>),

    /// List all pages ordered by id.
    List(RpcReplyPort<Result<Vec<DbPage>, PagewrightError>>),

    /// Look up a page by its path.
    FindByPath(String, RpcReplyPort<Result<Option<DbPage>, PagewrightError>>),

    /// Delete a page by its path; replies whether a row was removed.
    DeleteByPath(String, RpcReplyPort<Result<bool, PagewrightError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create_page(&self, create: PageCreate) -> Result<i64, PagewrightError> {
        ractor::call!(self.actor, DbActorMessage::Create, create)
            .map_err(|e| PagewrightError::RactorError(format!("DbActor Create RPC failed: {e}")))?
    }

    pub async fn patch_page(&self, id: i64, patch: PagePatch) -> Result<(), PagewrightError> {
        ractor::call!(self.actor, DbActorMessage::Patch, PagePatchById { id, patch })
            .map_err(|e| PagewrightError::RactorError(format!("DbActor Patch RPC failed: {e}")))?
    }

    pub async fn list_pages(&self) -> Result<Vec<DbPage>, PagewrightError> {
        ractor::call!(self.actor, DbActorMessage::List)
            .map_err(|e| PagewrightError::RactorError(format!("DbActor List RPC failed: {e}")))?
    }

    pub async fn find_page_by_path(&self, path: &str) -> Result<Option<DbPage>, PagewrightError> {
        ractor::call!(self.actor, DbActorMessage::FindByPath, path.to_string()).map_err(|e| {
            PagewrightError::RactorError(format!("DbActor FindByPath RPC failed: {e}"))
        })?
    }

    pub async fn delete_page_by_path(&self, path: &str) -> Result<bool, PagewrightError> {
        ractor::call!(self.actor, DbActorMessage::DeleteByPath, path.to_string()).map_err(|e| {
            PagewrightError::RactorError(format!("DbActor DeleteByPath RPC failed: {e}"))
        })?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Create(create, reply) => {
                let res = self.create_page(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Patch(patch, reply) => {
                let res = patch.apply_patch(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::List(reply) => {
                let res = self.list_pages(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::FindByPath(path, reply) => {
                let res = self.find_page_by_path(&state.pool, &path).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteByPath(path, reply) => {
                let res = self.delete_page_by_path(&state.pool, &path).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn create_page(
        &self,
        pool: &SqlitePool,
        create: PageCreate,
    ) -> Result<i64, PagewrightError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO page (page_name, path, template_file, title, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(create.page_name)
        .bind(create.path)
        .bind(create.template_file)
        .bind(create.title)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    async fn list_pages(&self, pool: &SqlitePool) -> Result<Vec<DbPage>, PagewrightError> {
        let rows = sqlx::query_as::<_, DbPage>(
            r#"
        SELECT id, page_name, path, template_file, title, created_at, updated_at
        FROM page
        ORDER BY id
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn find_page_by_path(
        &self,
        pool: &SqlitePool,
        path: &str,
    ) -> Result<Option<DbPage>, PagewrightError> {
        let row = sqlx::query_as::<_, DbPage>(
            r#"
        SELECT id, page_name, path, template_file, title, created_at, updated_at
        FROM page
        WHERE path = ?
        "#,
        )
        .bind(path)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn delete_page_by_path(
        &self,
        pool: &SqlitePool,
        path: &str,
    ) -> Result<bool, PagewrightError> {
        let res = sqlx::query("DELETE FROM page WHERE path = ?")
            .bind(path)
            .execute(pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The actor is unnamed so that several instances (e.g. one per test) can coexist.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, PagewrightError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| PagewrightError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), PagewrightError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
