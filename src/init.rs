use std::str::FromStr;
use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{
    constants::DEFAULT_DATABASE_URL,
    storage::{KeyValueStore, SessionStorage, SqliteStorage},
    store::QuoteStore,
    view::QuoteView,
    Data,
};

async fn init_database(db_url: &str) -> anyhow::Result<Pool<Sqlite>> {
    tracing::info!("initializing database connection...");
    let opts = SqliteConnectOptions::from_str(db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, url = %db_url, "an error occurred when connecting to the database"))?;

    tracing::info!("running migrations...");
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("finished running migrations!");

    Ok(db)
}

fn init_database_url(flag: Option<String>) -> String {
    match flag.or_else(|| std::env::var("DATABASE_URL").ok()) {
        Some(url) => url,
        None => {
            tracing::info!("no DATABASE_URL set, using {}.", DEFAULT_DATABASE_URL);
            DEFAULT_DATABASE_URL.to_string()
        }
    }
}

/// wires storage, store and view together for one process run.
pub async fn init_data(durable: Arc<dyn KeyValueStore>, rng: StdRng) -> Data {
    let session: Arc<dyn KeyValueStore> = Arc::new(SessionStorage::new());

    let store = QuoteStore::initialize(durable.clone()).await;
    let view = QuoteView::initialize(durable, session).await;

    Data { store, view, rng }
}

pub async fn init(database_url: Option<String>) -> anyhow::Result<Data> {
    tracing::info!("initializing... please wait warmly.");

    let db_url = init_database_url(database_url);
    let db = init_database(&db_url).await?;
    let data = init_data(Arc::new(SqliteStorage::new(db)), StdRng::from_entropy()).await;

    tracing::info!("finished initializing!");
    Ok(data)
}

#[cfg(test)]
pub(crate) async fn memory_database() -> Pool<Sqlite> {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&db).await.unwrap();

    db
}

#[cfg(test)]
pub(crate) async fn memory_data(seed: u64) -> Data {
    let durable = Arc::new(SqliteStorage::new(memory_database().await));
    init_data(durable, StdRng::seed_from_u64(seed)).await
}
