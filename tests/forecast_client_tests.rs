use std::future::Future;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use bank_dashboard::error::DashboardError;
use bank_dashboard::forecast::client::parse_predictions;
use bank_dashboard::forecast::{build_merged_series, ForecastClient, Forecaster};
use bank_dashboard::model::bank::Bank;
use bank_dashboard::model::forecast::PredictionPoint;
use chrono::NaiveDate;

struct StubForecaster {
    values: Option<Vec<f64>>,
}

impl Forecaster for StubForecaster {
    fn predict(
        &self,
        _bank: Bank,
        horizon: usize,
    ) -> impl Future<Output = Result<Vec<f64>, DashboardError>> + Send {
        let out = match &self.values {
            Some(v) => Ok(v.iter().take(horizon).copied().collect()),
            None => Err(DashboardError::RemoteUnavailable("stub offline".to_string())),
        };
        async move { out }
    }

    fn simulate(
        &self,
        _bank: Bank,
        factor_open: f64,
        horizon: usize,
    ) -> impl Future<Output = Result<Vec<f64>, DashboardError>> + Send {
        let out = match &self.values {
            Some(v) => Ok(v.iter().take(horizon).map(|x| x * factor_open).collect()),
            None => Err(DashboardError::RemoteUnavailable("stub offline".to_string())),
        };
        async move { out }
    }
}

#[test]
fn parse_service_reply() {
    let values = parse_predictions(r#"{"predicciones": [17.312, 17.5, 17.61]}"#).unwrap();
    assert_eq!(values, vec![17.312, 17.5, 17.61]);
}

#[test]
fn parse_rejects_empty_or_malformed_reply() {
    assert!(matches!(
        parse_predictions(r#"{"predicciones": []}"#),
        Err(DashboardError::RemoteUnavailable(_))
    ));
    assert!(matches!(
        parse_predictions(r#"{"detail": "not found"}"#),
        Err(DashboardError::Json(_))
    ));
}

#[test]
fn stub_forecast_feeds_merge() {
    let stub = StubForecaster {
        values: Some(vec![101.0, 102.0, 103.0, 104.0]),
    };
    let values = tokio_test::block_on(stub.predict(Bank::Bbva, 3)).unwrap();
    let merged = build_merged_series(
        PredictionPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            value: 100.0,
        },
        &values,
        3,
    );
    assert_eq!(merged.len(), 4);
}

#[test]
fn stub_failure_is_remote_unavailable() {
    let stub = StubForecaster { values: None };
    let err = tokio_test::block_on(stub.predict(Bank::Santander, 3)).unwrap_err();
    assert!(err.is_remote());
    let err = tokio_test::block_on(stub.simulate(Bank::Santander, 1.05, 3)).unwrap_err();
    assert!(matches!(err, DashboardError::RemoteUnavailable(_)));
}

#[test]
fn stub_simulation_scales_values() {
    let stub = StubForecaster {
        values: Some(vec![10.0, 20.0]),
    };
    let values = tokio_test::block_on(stub.simulate(Bank::Bbva, 1.1, 3)).unwrap();
    assert_eq!(values.len(), 2);
    assert!((values[1] - 22.0).abs() < 1e-9);
}

fn local_client(base_url: &str) -> ForecastClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    ForecastClient::with_http(http, base_url)
}

/// Read one full HTTP request (headers plus Content-Length body).
fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Serve a single canned response and hand back the request that was received.
fn serve_once(status: &str, body: &str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });
    (format!("http://{}", addr), handle)
}

#[test]
fn client_posts_horizon_and_decodes_reply() {
    let (base, server) = serve_once("200 OK", r#"{"predicciones": [17.31, 17.5, 17.62]}"#);
    let client = local_client(&base);

    let values = tokio_test::block_on(client.predict(Bank::Bbva, 3)).unwrap();
    assert_eq!(values, vec![17.31, 17.5, 17.62]);

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /predict/bbva "));
    assert!(request.contains(r#""n_future":3"#));
}

#[test]
fn client_maps_error_status_to_remote_unavailable() {
    let (base, server) = serve_once("503 Service Unavailable", r#"{"detail": "warming up"}"#);
    let client = local_client(&base);

    let err = tokio_test::block_on(client.simulate(Bank::Santander, 1.05, 3)).unwrap_err();
    match &err {
        DashboardError::RemoteUnavailable(msg) => assert!(msg.contains("503")),
        other => panic!("expected RemoteUnavailable, got {:?}", other),
    }
    assert!(err.is_remote());

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /simulate/santander "));
}

#[test]
fn client_maps_refused_connection_to_remote_unavailable() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = local_client(&format!("http://{}", addr));

    let err = tokio_test::block_on(client.predict(Bank::Bbva, 3)).unwrap_err();
    assert!(matches!(err, DashboardError::RemoteUnavailable(_)));
}
