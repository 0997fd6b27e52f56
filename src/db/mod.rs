use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod pg;
pub mod store;

pub use pg::PgFuncionarioStore;
pub use store::FuncionarioStore;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}
