use reqwest::Client;
use std::time::Duration;
use tokengate_core::BucketConfig;
use tokengate_server::api::create_router;
use tokengate_server::api::handlers::AppState;
use tokengate_server::scheduler::RefillScheduler;

// Single test per binary: the Prometheus recorder is process-global, so
// counters would otherwise accumulate across tests.

fn metric_value(body: &str, name: &str) -> Option<f64> {
    body.lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (key, value) = line.split_once(' ')?;
            (key == name).then(|| value.trim().parse().ok()).flatten()
        })
}

#[tokio::test]
async fn gate_and_scheduler_metrics_are_exported() {
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install recorder");

    let state = AppState::new(BucketConfig::default(), prometheus_handle);
    let app = create_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = Client::new();

    // One scheduler tick adds one token
    let refill = RefillScheduler::new(state.bucket.clone(), Duration::from_millis(100)).start();
    tokio::time::sleep(Duration::from_millis(150)).await;
    refill.stop().await;
    assert_eq!(state.bucket.len(), 1);

    let resp = client.get(format!("{}/test", base_url)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let resp = client.get(format!("{}/test", base_url)).send().await.unwrap();
    assert_eq!(resp.status(), 429);

    let body = client
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(metric_value(&body, "tokengate_refills_total"), Some(1.0));
    assert_eq!(metric_value(&body, "tokengate_admitted_total"), Some(1.0));
    assert_eq!(metric_value(&body, "tokengate_rejected_total"), Some(1.0));
    assert_eq!(metric_value(&body, "tokengate_bucket_tokens"), Some(0.0));

    // Tokens added outside the scheduler still show up: the gauge is read at scrape time
    state.bucket.refill();
    state.bucket.refill();
    let body = client
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(metric_value(&body, "tokengate_bucket_tokens"), Some(2.0));
    assert_eq!(metric_value(&body, "tokengate_refills_total"), Some(1.0));
}
