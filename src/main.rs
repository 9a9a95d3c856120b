use std::sync::Arc;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tokio::sync::RwLock;

use scrum_roster::{
    app_state::{AppState, ProjectStoreType},
    get_postgres_pool,
    services::data_stores::{HashmapProjectStore, PostgresProjectStore},
    utils::{
        constants::{prod, StoreKind, DATABASE_URL, ROSTER_STORE},
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let project_store = configure_project_store().await?;
    let app_state = AppState::new(project_store);

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .map_err(|e| eyre!("Failed to build app: {e}"))?;

    app.run().await.wrap_err("Failed to run app")
}

async fn configure_project_store() -> Result<ProjectStoreType> {
    match *ROSTER_STORE {
        StoreKind::Postgres => {
            let pg_pool = get_postgres_pool(&DATABASE_URL)
                .await
                .wrap_err("Failed to create Postgres connection pool")?;

            sqlx::migrate!()
                .run(&pg_pool)
                .await
                .wrap_err("Failed to run migrations")?;

            Ok(Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool))))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory project store, data is not persisted");
            Ok(Arc::new(RwLock::new(HashmapProjectStore::default())))
        }
    }
}
