#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Cargo builds the server binary for integration tests and tells us where it is
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_datas-api"));
        cmd.env("API_PORT", port.to_string())
            // Tokens minted in this process must validate in the server
            .env("JWT_SECRET", &datas_api::config::config().security.jwt_secret)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL and DATA_CENTER_URI
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/api/v1/utils/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Bearer token for a throwaway user
pub fn bearer_token() -> String {
    let claims = datas_api::auth::Claims::new(Uuid::new_v4(), "tester@example.com", false);
    let token = datas_api::auth::generate_jwt(&claims).expect("token generation");
    format!("Bearer {}", token)
}

/// Pool for the data-center database, or None when DATA_CENTER_URI is unset
pub async fn data_center_pool() -> Result<Option<PgPool>> {
    connect_optional("DATA_CENTER_URI").await
}

/// Pool for the application database, or None when DATABASE_URL is unset
pub async fn main_pool() -> Result<Option<PgPool>> {
    connect_optional("DATABASE_URL").await
}

async fn connect_optional(var: &str) -> Result<Option<PgPool>> {
    let Ok(url) = std::env::var(var) else {
        eprintln!("skipping: {} is not set", var);
        return Ok(None);
    };
    let pool = PgPool::connect(&url).await.with_context(|| format!("connecting to {}", var))?;
    Ok(Some(pool))
}

/// Table name unique to this test run
pub fn unique_table(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

const APP_TABLES_SQL: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS data_query_config (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        db_name TEXT NOT NULL,
        table_name TEXT NOT NULL,
        db_uri TEXT,
        enabled BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ DEFAULT now(),
        updated_at TIMESTAMPTZ DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS data_query (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        sql TEXT NOT NULL,
        config_id UUID NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ DEFAULT now(),
        updated_at TIMESTAMPTZ DEFAULT now()
    )",
];

/// Both pools, with the config tables present in the application database.
/// None unless DATABASE_URL and DATA_CENTER_URI are both set.
pub async fn app_and_data_pools() -> Result<Option<(PgPool, PgPool)>> {
    let (Some(main), Some(data)) = (main_pool().await?, data_center_pool().await?) else {
        return Ok(None);
    };

    // Tests run concurrently; serialize the DDL
    let mut tx = main.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(734201)").execute(&mut *tx).await?;
    for ddl in APP_TABLES_SQL {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    Ok(Some((main, data)))
}

pub async fn insert_config(
    main: &PgPool,
    name: &str,
    table_name: &str,
    enabled: bool,
    created_at: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO data_query_config (id, name, db_name, table_name, enabled, created_at)
         VALUES ($1, $2, 'datacenter', $3, $4, $5::timestamptz)",
    )
    .bind(id)
    .bind(name)
    .bind(table_name)
    .bind(enabled)
    .bind(created_at)
    .execute(main)
    .await?;
    Ok(id)
}

pub async fn insert_saved_query(main: &PgPool, config_id: Uuid, name: &str, sql: &str, created_at: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO data_query (id, name, sql, config_id, created_at)
         VALUES ($1, $2, $3, $4, $5::timestamptz)",
    )
    .bind(id)
    .bind(name)
    .bind(sql)
    .bind(config_id)
    .bind(created_at)
    .execute(main)
    .await?;
    Ok(id)
}
