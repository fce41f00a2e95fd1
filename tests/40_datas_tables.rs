mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

// End-to-end browsing over HTTP. Table routes need DATA_CENTER_URI; routes
// that go through query configs also need DATABASE_URL.

async fn get(path: &str) -> Result<(StatusCode, Value)> {
    let server = common::ensure_server().await?;
    let res = reqwest::Client::new()
        .get(format!("{}{}", server.base_url, path))
        .header("Authorization", common::bearer_token())
        .send()
        .await?;
    let status = res.status();
    let body = res.json::<Value>().await?;
    Ok((status, body))
}

#[tokio::test]
async fn browse_table_by_name() -> Result<()> {
    let Some(pool) = common::data_center_pool().await? else { return Ok(()) };
    let table = common::unique_table("http_articles");

    sqlx::query(&format!(
        "CREATE TABLE \"{}\" (id BIGINT, title TEXT, publish_time TIMESTAMPTZ, extra TEXT)",
        table
    ))
    .execute(&pool)
    .await?;
    sqlx::query(&format!(
        "INSERT INTO \"{}\" SELECT n, 't' || n, TIMESTAMPTZ '2024-06-01' + n * INTERVAL '1 day', 'x' \
         FROM generate_series(1, 5) AS n",
        table
    ))
    .execute(&pool)
    .await?;

    let (status, body) = get(&format!("/api/v1/datas/tables/{}?offset=1&limit=2", table)).await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 5);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"][0]["id"], 4);
    assert!(body["data"][0].get("extra").is_none());

    // `skip` is accepted as an alias for `offset`
    let (_, skipped) = get(&format!("/api/v1/datas/tables/{}?skip=1&limit=2", table)).await?;
    assert_eq!(skipped["data"], body["data"]);

    let (status, columns) = get(&format!("/api/v1/datas/tables/{}/columns", table)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(columns["data"][0]["name"], "id");

    let (status, listing) = get("/api/v1/datas/tables").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(listing["data"]
        .as_array()
        .is_some_and(|names| names.iter().any(|n| n == table.as_str())));

    sqlx::query(&format!("DROP TABLE \"{}\"", table)).execute(&pool).await?;
    Ok(())
}

#[tokio::test]
async fn unknown_table_is_404() -> Result<()> {
    if common::data_center_pool().await?.is_none() {
        return Ok(());
    }

    let (status, body) = get(&format!("/api/v1/datas/tables/{}", common::unique_table("ghost"))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn configs_list_enabled_newest_first() -> Result<()> {
    let Some((main, _)) = common::app_and_data_pools().await? else { return Ok(()) };

    // Far-future timestamps put these rows at the head of the listing
    sqlx::query("DELETE FROM data_query_config WHERE created_at > '2900-01-01'")
        .execute(&main)
        .await?;
    let older = common::insert_config(&main, "listing older", "articles", true, "2999-01-01").await?;
    let newer = common::insert_config(&main, "listing newer", "articles", true, "2999-01-02").await?;
    let hidden = common::insert_config(&main, "listing hidden", "articles", false, "2999-01-03").await?;

    let (status, body) = get("/api/v1/datas/configs?limit=2").await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["data"][0]["id"], newer.to_string());
    assert_eq!(body["data"][1]["id"], older.to_string());
    assert_eq!(body["data"][0]["name"], "listing newer");
    assert!(body["data"][0].get("table_name").is_none());
    assert!(body["count"].as_i64().is_some_and(|count| count >= 2));

    // The disabled row is the newest of all, so it would lead the page if listed
    let (_, page) = get("/api/v1/datas/configs?limit=10").await?;
    assert_eq!(page["data"][0]["id"], newer.to_string());
    assert!(page["data"]
        .as_array()
        .is_some_and(|rows| rows.iter().all(|row| row["id"] != hidden.to_string())));

    sqlx::query("DELETE FROM data_query_config WHERE id = ANY($1)")
        .bind(vec![older, newer, hidden])
        .execute(&main)
        .await?;
    Ok(())
}

#[tokio::test]
async fn saved_queries_are_listed_and_run() -> Result<()> {
    let Some((main, _)) = common::app_and_data_pools().await? else { return Ok(()) };

    let config = common::insert_config(&main, "saved", "articles", true, "2024-01-01").await?;
    let first = common::insert_saved_query(&main, config, "first", "SELECT 1 AS n", "2024-01-01").await?;
    let second =
        common::insert_saved_query(&main, config, "second", "SELECT 7 AS seven, 'x'::text AS label", "2024-02-01")
            .await?;

    let (status, body) = get(&format!("/api/v1/datas/sqls/{}", config)).await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["id"], second.to_string());
    assert_eq!(body["data"][1]["id"], first.to_string());
    assert_eq!(body["data"][0]["sql"], "SELECT 7 AS seven, 'x'::text AS label");
    assert!(body["data"][0].get("config_id").is_none());

    let (status, body) = get(&format!("/api/v1/datas/sql/{}", second)).await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["seven"], 7);
    assert_eq!(body["data"][0]["label"], "x");

    let (status, _) = get(&format!("/api/v1/datas/sql/{}", Uuid::new_v4())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    sqlx::query("DELETE FROM data_query WHERE config_id = $1").bind(config).execute(&main).await?;
    sqlx::query("DELETE FROM data_query_config WHERE id = $1").bind(config).execute(&main).await?;
    Ok(())
}

#[tokio::test]
async fn detail_flattens_content() -> Result<()> {
    let Some((main, data)) = common::app_and_data_pools().await? else { return Ok(()) };

    let posts = common::unique_table("detail_posts");
    let loose = common::unique_table("detail_loose");
    sqlx::query(&format!("CREATE TABLE \"{}\" (id BIGINT, title TEXT, content TEXT)", posts))
        .execute(&data)
        .await?;
    sqlx::query(&format!(
        "INSERT INTO \"{}\" VALUES (1, 'Post', $1)",
        posts
    ))
    .bind(r#"[{"title": "Intro", "body": "Hello"}, {"title": "End", "body": "Bye"}]"#)
    .execute(&data)
    .await?;
    sqlx::query(&format!("CREATE TABLE \"{}\" (a INT, content TEXT)", loose))
        .execute(&data)
        .await?;

    let posts_config = common::insert_config(&main, "detail posts", &posts, true, "2024-01-01").await?;
    let loose_config = common::insert_config(&main, "detail loose", &loose, true, "2024-01-01").await?;

    let (status, body) = get(&format!("/api/v1/datas/{}/detail/1", posts_config)).await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["data"]["title"], "Post");
    assert_eq!(body["data"]["content"], "Intro:\nHello\nEnd:\nBye");

    let (status, body) = get(&format!("/api/v1/datas/{}/detail/999", posts_config)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = get(&format!("/api/v1/datas/{}/detail/1", loose_config)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().is_some_and(|m| m.contains("has no 'id' column")));

    let (status, _) = get(&format!("/api/v1/datas/{}/detail/1", Uuid::new_v4())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&format!("/api/v1/datas/table/{}", posts_config)).await?;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["count"], 1);

    sqlx::query("DELETE FROM data_query_config WHERE id = ANY($1)")
        .bind(vec![posts_config, loose_config])
        .execute(&main)
        .await?;
    for table in [&posts, &loose] {
        sqlx::query(&format!("DROP TABLE \"{}\"", table)).execute(&data).await?;
    }
    Ok(())
}
