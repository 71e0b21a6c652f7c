//! End-to-end routing tests
//!
//! Each test builds a throwaway site folder and an in-memory seeded store,
//! then drives requests through the same entry points the server uses.

use http_body_util::BodyExt;
use hyper::Request;
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use pokesite::config::{AppState, Config, DatabaseConfig, LoggingConfig, ServerConfig, SiteConfig};
use pokesite::db::Store;
use pokesite::handler::handle_request;
use pokesite::server;

const RECORD_TEMPLATE: &str =
    r#"<h1>PokemonName</h1><span>#PokemonNumber</span><img id="off" class="polystaroff"/>"#;

fn test_config(root: &Path) -> Config {
    Config {
        server: ServerConfig { port: 0 },
        site: SiteConfig {
            root: root.to_path_buf(),
            default_document: "index.html".to_string(),
        },
        database: DatabaseConfig {
            path: ":memory:".into(),
            initialize: true,
        },
        logging: LoggingConfig {
            level: "error".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
    }
}

fn build_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("index.html"), "<html>home</html>").unwrap();
    fs::write(root.join("pokemon.html"), RECORD_TEMPLATE).unwrap();
    fs::write(root.join("pokedex.html"), "<html>dex</html>").unwrap();
    fs::write(root.join("legacy.htm"), "<html>old</html>").unwrap();
    fs::create_dir_all(root.join("a/B")).unwrap();
    fs::write(root.join("a/B/c.txt"), "deep").unwrap();
    fs::create_dir(root.join("styles")).unwrap();
    fs::write(root.join("styles/site.css"), "body{}").unwrap();
    dir
}

async fn seeded_state(root: &Path) -> Arc<AppState> {
    let store = Store::open_in_memory().unwrap();
    store.initialize().await.unwrap();
    Arc::new(AppState::new(test_config(root), store))
}

struct Reply {
    status: u16,
    content_type: Option<String>,
    body: String,
}

async fn get(state: &Arc<AppState>, target: &str) -> Reply {
    let req = Request::builder().uri(target).body(()).unwrap();
    let resp = handle_request(req, Arc::clone(state), None).await.unwrap();
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

fn ids(body: &str) -> Vec<i64> {
    let rows: Vec<Value> = serde_json::from_str(body).unwrap();
    rows.iter().map(|r| r["ID"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn test_root_serves_default_document() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("application/xhtml+xml"));
    assert_eq!(reply.body, "<html>home</html>");
}

#[tokio::test]
async fn test_static_paths_match_case_exactly() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/a/B/c.txt").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("text/plain"));
    assert_eq!(reply.body, "deep");

    for wrong in ["/a/b/c.txt", "/A/B/c.txt", "/a/B/C.txt", "/Index.html"] {
        let reply = get(&state, wrong).await;
        assert_eq!(reply.status, 404, "{wrong}");
        assert_eq!(reply.body, "URL not found (check case)");
    }
}

#[tokio::test]
async fn test_stylesheet_content_type() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/styles/site.css").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("text/css"));
}

#[tokio::test]
async fn test_disabled_extension_is_unsupported() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/legacy.htm").await;
    assert_eq!(reply.status, 415);
    assert_eq!(reply.body, "File type not supported");
}

#[tokio::test]
async fn test_unknown_url_is_not_found() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/nowhere/at/all.html").await;
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body, "URL not found (check case)");
}

#[tokio::test]
async fn test_dynamic_page_without_query_is_static() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/pokemon.html").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, RECORD_TEMPLATE);
}

#[tokio::test]
async fn test_record_page_renders_row() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/pokemon.html?id=4").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("application/xhtml+xml"));
    assert!(reply.body.contains("<h1>Charmander</h1>"));
    assert!(reply.body.contains("#004"));
    assert!(reply.body.contains(r#"id="off""#));
}

#[tokio::test]
async fn test_record_page_bad_params() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    for target in [
        "/pokemon.html?id=999",
        "/pokemon.html?id=four",
        "/pokemon.html?a=1&b=2&c=3",
    ] {
        let reply = get(&state, target).await;
        assert_eq!(reply.status, 404, "{target}");
        assert_eq!(reply.body, "URL not found (check params)");
    }
}

#[tokio::test]
async fn test_favourite_toggle_round_trip() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/pokemon.html?ps=1&id=25").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    let rows: Vec<Value> = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["NAME"], "Pikachu");
    assert_eq!(rows[0]["PS"], true);

    assert_eq!(ids(&get(&state, "/favoonData").await.body), vec![25]);

    let page = get(&state, "/pokemon.html?id=25").await;
    assert!(page.body.contains(r#"id="on""#));
    assert!(page.body.contains("polystaron"));

    let reply = get(&state, "/pokemon.html?ps=false&id=25").await;
    assert_eq!(reply.status, 200);
    assert!(ids(&get(&state, "/favoonData").await.body).is_empty());
}

#[tokio::test]
async fn test_favourite_toggle_unknown_id() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/pokemon.html?ps=1&id=500").await;
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body, "URL not found (check params)");
}

#[tokio::test]
async fn test_search_page_queries() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    assert_eq!(ids(&get(&state, "/pokedex.html?TYPE=Fire").await.body), vec![4, 5, 6]);
    assert_eq!(
        ids(&get(&state, "/pokedex.html?TYPE=Flying").await.body),
        vec![6, 12, 16, 17, 18, 21, 22]
    );
    assert_eq!(ids(&get(&state, "/pokedex.html?TYPE=ALL").await.body).len(), 25);
    assert_eq!(ids(&get(&state, "/pokedex.html?ID=7").await.body), vec![7]);
    assert!(ids(&get(&state, "/pokedex.html?TYPE=fire").await.body).is_empty());

    let reply = get(&state, "/pokedex.html?kind=Fire").await;
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body, "URL not found (check params)");
}

#[tokio::test]
async fn test_bulk_endpoints() {
    let site = build_site();
    let state = seeded_state(site.path()).await;

    let reply = get(&state, "/startersData").await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    assert_eq!(ids(&reply.body), vec![1, 4, 7, 25]);

    assert_eq!(ids(&get(&state, "/pokemonsData").await.body).len(), 25);
    assert_eq!(ids(&get(&state, "/favooffData").await.body).len(), 25);

    // Endpoints match the whole target
    assert_eq!(get(&state, "/startersdata").await.status, 404);
    assert_eq!(get(&state, "/startersData?x=1").await.status, 404);
}

#[tokio::test]
async fn test_missing_table_is_internal_error() {
    let site = build_site();
    let store = Store::open_in_memory().unwrap();
    let state = Arc::new(AppState::new(test_config(site.path()), store));

    let reply = get(&state, "/startersData").await;
    assert_eq!(reply.status, 500);
    assert_eq!(reply.body, "Internal server error");

    // Static files do not depend on the store
    assert_eq!(get(&state, "/").await.status, 200);
}

#[test]
fn test_served_over_tcp() {
    let site = build_site();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async {
        let state = seeded_state(site.path()).await;
        let listener = server::create_listener(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

        let serving = tokio::task::spawn_local(server::run(listener, state, async move {
            let _ = stop_rx.await;
            "test"
        }));

        let response = tokio::task::spawn_blocking(move || {
            let mut stream = std::net::TcpStream::connect(addr).unwrap();
            stream
                .write_all(b"GET /startersData HTTP/1.0\r\nHost: localhost\r\n\r\n")
                .unwrap();
            let mut response = String::new();
            stream.read_to_string(&mut response).unwrap();
            response
        })
        .await
        .unwrap();

        assert!(response.starts_with("HTTP/1."), "{response}");
        assert!(response.contains(" 200 OK"), "{response}");
        assert!(response.contains("content-type: application/json"));
        assert!(response.contains("\"NAME\":\"Pikachu\""));

        stop_tx.send(()).unwrap();
        serving.await.unwrap();
    });
}
