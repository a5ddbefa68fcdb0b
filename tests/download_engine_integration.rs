//! Integration tests for the avatar task and the download engine.
//!
//! Every test runs against a mock server that stands in for both the model
//! service and the render service.

use std::sync::Arc;
use std::time::{Duration, Instant};

use avatar_downloader::avatar::layout;
use avatar_downloader::{
    AvatarId, AvatarResult, AvatarTaskConfig, CameraMode, DownloadEngine, HttpClient, Pose,
    RenderParams, ServiceEndpoints, aggregate, run_avatar_task,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn id(raw: &str) -> AvatarId {
    AvatarId::parse(raw).expect("valid test id")
}

fn task_config(server: &MockServer, root: &std::path::Path) -> AvatarTaskConfig {
    let mut config = AvatarTaskConfig::new(root);
    config.endpoints = ServiceEndpoints::new(
        &format!("{}/v1/avatars/", server.uri()),
        &format!("{}/render", server.uri()),
    )
    .expect("mock endpoints are valid");
    config.timeout = Duration::from_secs(10);
    config
}

async fn mount_all_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/avatars/[a-f0-9]+\.glb$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"glb".to_vec()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/render/[a-f0-9]+\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

#[tokio::test]
async fn test_avatar_task_fetches_model_and_all_poses() {
    let server = MockServer::start().await;
    mount_all_ok(&server).await;
    let dir = TempDir::new().unwrap();
    let config = task_config(&server, dir.path());
    let avatar = id("abc123");

    let result = run_avatar_task(&HttpClient::new(), avatar.clone(), &config).await;

    assert_eq!(result.model_reason(), "downloaded");
    assert_eq!(result.images_ok, 4);
    assert_eq!(result.images_failed, 0);
    assert!(layout::model_path(dir.path(), &avatar).is_file());
    for pose in Pose::ALL {
        let image = layout::image_path(dir.path(), &avatar, pose);
        assert_eq!(std::fs::read(&image).unwrap(), b"png", "{}", image.display());
    }
    assert_eq!(request_count(&server).await, 5);
}

#[tokio::test]
async fn test_avatar_task_model_failure_skips_previews() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/avatars/dead01.glb"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let config = task_config(&server, dir.path());

    let result = run_avatar_task(&HttpClient::new(), id("dead01"), &config).await;

    assert!(!result.model_succeeded());
    assert_eq!(result.model_reason(), "http_404");
    assert_eq!(result.image_attempts(), 0);
    assert_eq!(request_count(&server).await, 1, "no preview may be requested");
}

#[tokio::test]
async fn test_avatar_task_counts_each_pose_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/render/abc.png"))
        .and(query_param("pose", "relaxed"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_all_ok(&server).await;
    let dir = TempDir::new().unwrap();
    let config = task_config(&server, dir.path());
    let avatar = id("abc");

    let result = run_avatar_task(&HttpClient::new(), avatar.clone(), &config).await;

    assert!(result.model_succeeded());
    assert_eq!(result.images_ok, 3);
    assert_eq!(result.images_failed, 1);
    assert_eq!(request_count(&server).await, 5);
    assert!(!layout::image_path(dir.path(), &avatar, Pose::Relaxed).exists());
    assert!(layout::image_path(dir.path(), &avatar, Pose::ThumbsUp).exists());
}

#[tokio::test]
async fn test_avatar_task_sends_render_parameters() {
    let server = MockServer::start().await;
    mount_all_ok(&server).await;
    let dir = TempDir::new().unwrap();
    let mut config = task_config(&server, dir.path());
    config.render = RenderParams::new(5000, CameraMode::Fullbody, "255,0,0");

    run_avatar_task(&HttpClient::new(), id("abc"), &config).await;

    let requests = server.received_requests().await.unwrap();
    let previews: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/render/"))
        .collect();
    assert_eq!(previews.len(), 4);
    for request in previews {
        let pairs: Vec<(String, String)> = request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        assert_eq!(get("size"), "1024");
        assert_eq!(get("camera"), "fullbody");
        assert_eq!(get("background"), "255,0,0");
        assert_eq!(get("expression"), "happy");
    }
}

#[tokio::test]
async fn test_avatar_task_rerun_makes_no_requests() {
    let server = MockServer::start().await;
    mount_all_ok(&server).await;
    let dir = TempDir::new().unwrap();
    let config = task_config(&server, dir.path());
    let client = HttpClient::new();

    let first = run_avatar_task(&client, id("abc"), &config).await;
    let after_first = request_count(&server).await;
    let second = run_avatar_task(&client, id("abc"), &config).await;

    assert_eq!(first.model_reason(), "downloaded");
    assert_eq!(second.model_reason(), "exists");
    assert_eq!(second.images_ok, 4);
    assert_eq!(request_count(&server).await, after_first);
}

#[tokio::test]
async fn test_engine_reports_one_result_per_id_with_duplicates() {
    let server = MockServer::start().await;
    mount_all_ok(&server).await;
    let dir = TempDir::new().unwrap();
    let config = Arc::new(task_config(&server, dir.path()));
    let ids = vec![id("aa"), id("bb"), id("aa"), id("cc")];

    let engine = DownloadEngine::new(2).unwrap();
    let results = engine.dispatch(ids, HttpClient::new(), config);
    let mut seen = Vec::new();
    let summary = aggregate(results, |r: &AvatarResult| seen.push(r.id.to_string())).await;

    seen.sort();
    assert_eq!(seen, vec!["aa", "aa", "bb", "cc"]);
    assert_eq!(summary.models_ok, 4);
    assert_eq!(summary.models_failed, 0);
    assert_eq!(summary.images_ok + summary.images_failed, 16);
}

#[tokio::test]
async fn test_engine_repeated_id_never_fails_model() {
    let server = MockServer::start().await;
    let model: Vec<u8> = (0..4_000_000u32).map(|i| (i % 241) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/v1/avatars/abc.glb"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(model.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/render/abc\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let config = Arc::new(task_config(&server, dir.path()));
    let copies = 16;
    let ids = vec![id("abc"); copies];

    let engine = DownloadEngine::new(copies).unwrap();
    let results = engine.dispatch(ids, HttpClient::new(), config);
    let mut failures = Vec::new();
    let summary = aggregate(results, |r: &AvatarResult| {
        if !r.model_succeeded() {
            failures.push(r.model_reason());
        }
    })
    .await;

    assert!(failures.is_empty(), "unexpected model failures: {failures:?}");
    assert_eq!(summary.models_ok, copies);
    assert_eq!(summary.models_failed, 0);
    assert_eq!(summary.images_failed, 0);
    assert_eq!(
        std::fs::read(layout::model_path(dir.path(), &id("abc"))).unwrap(),
        model
    );
    let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("abc"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[tokio::test]
async fn test_engine_mixed_outcomes_aggregate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/avatars/bad.glb"))
        .respond_with(ResponseTemplate::new(404))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_all_ok(&server).await;
    let dir = TempDir::new().unwrap();
    let config = Arc::new(task_config(&server, dir.path()));

    let engine = DownloadEngine::new(4).unwrap();
    let results = engine.dispatch(vec![id("aaa"), id("bad"), id("ccc")], HttpClient::new(), config);
    let summary = aggregate(results, |_| {}).await;

    assert_eq!(summary.models_ok, 2);
    assert_eq!(summary.models_failed, 1);
    assert_eq!(summary.images_ok, 8);
    assert_eq!(summary.images_failed, 0);
    assert_eq!(summary.status(), avatar_downloader::RunStatus::PartialFailure);
}

#[tokio::test]
async fn test_engine_respects_concurrency_limit() {
    let server = MockServer::start().await;
    // Model failures short-circuit, so each avatar costs exactly one delayed request.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_millis(150)))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let config = Arc::new(task_config(&server, dir.path()));
    let ids = vec![id("a1"), id("a2"), id("a3"), id("a4")];

    let engine = DownloadEngine::new(1).unwrap();
    let start = Instant::now();
    let results = engine.dispatch(ids, HttpClient::new(), config);
    let summary = aggregate(results, |_| {}).await;
    let elapsed = start.elapsed();

    assert_eq!(summary.models_failed, 4);
    assert!(
        elapsed >= Duration::from_millis(550),
        "one worker must run avatars back to back, took {elapsed:?}"
    );
}
