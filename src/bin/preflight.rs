use cars_api::infra::config;
use cars_api::infra::logging;
use cars_api::{CarStore, PostgresCarStore};
use sqlx::postgres::PgPoolOptions;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--provision]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         \n\
         --provision   create the cars table if it is missing\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    logging::init_logging(config::log_format());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let provision = args.iter().any(|a| a == "--provision");

    let database_url = config::database_url()?;
    let max_connections = config::db_max_connections()?;
    tracing::info!(max_connections, bind_addr = %config::bind_addr(), "preflight");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to DATABASE_URL: {}", e))?;
    let store = PostgresCarStore::new(pool);

    store.ping().await?;
    tracing::info!("database reachable");

    let table_exists: bool = sqlx::query_scalar("SELECT to_regclass('public.cars') IS NOT NULL")
        .fetch_one(store.pool())
        .await?;

    if !table_exists {
        if !provision {
            return Err(anyhow::anyhow!(
                "Table `cars` does not exist. Re-run with --provision"
            ));
        }
        store.provision_schema().await?;
    }

    let rows = store.count().await?;
    tracing::info!(rows, "table `cars` ready");
    tracing::info!("preflight OK");
    Ok(())
}
