use std::time::Duration;

use airwatch_core::geocode::GeocodeRequest;
use airwatch_core::{FetchError, GeocodeError};
use airwatch_tui::geocoder::Geocoder;
use airwatch_tui::poller::{HttpReadingSource, ReadingSource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Answers exactly one request with `status` and `body`, and hands back the
/// raw request head it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = vec![0_u8; 4096];
        let mut request = Vec::new();
        loop {
            let read = socket.read(&mut buffer).await.unwrap();
            request.extend_from_slice(&buffer[..read]);
            if read == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{addr}"), handle)
}

#[tokio::test]
async fn fetch_decodes_reading_array() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"aqi": 120, "temperature": 31.5, "humidity": 70}, {"aqi": 40, "temperature": 20, "humidity": 40}]"#,
    )
    .await;

    let source = HttpReadingSource::new(format!("{base}/api/readings/"), TIMEOUT).unwrap();
    let readings = source.fetch().await.unwrap();

    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].aqi, 120);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/readings/ HTTP/1.1"));
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let (base, _server) = serve_once("500 Internal Server Error", "{}").await;

    let source = HttpReadingSource::new(base, TIMEOUT).unwrap();

    assert_eq!(source.fetch().await, Err(FetchError::Status(500)));
}

#[tokio::test]
async fn garbage_body_maps_to_decode() {
    let (base, _server) = serve_once("200 OK", "<html>not json</html>").await;

    let source = HttpReadingSource::new(base, TIMEOUT).unwrap();

    assert!(matches!(source.fetch().await, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn refused_connection_maps_to_transport() {
    // Bind then drop, so the port is known to be closed.
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();

    let source = HttpReadingSource::new(format!("http://{addr}/"), TIMEOUT).unwrap();

    assert!(matches!(source.fetch().await, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn geocoder_sends_bounded_chennai_query() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"lat": "13.0012", "lon": "80.2565", "name": "Adyar"}]"#,
    )
    .await;

    let geocoder = Geocoder::new(format!("{base}/search"), TIMEOUT).unwrap();
    let request = GeocodeRequest::new("Adyar").unwrap();
    let hit = geocoder.search(&request).await.unwrap().unwrap();

    assert_eq!(hit.label, "STREET VIEW: ADYAR");
    assert!((hit.point.lat - 13.0012).abs() < 1e-9);

    let head = server.await.unwrap();
    let request_line = head.lines().next().unwrap();
    assert!(request_line.contains("format=json"));
    assert!(request_line.contains("q=Adyar%2C+Chennai"));
    assert!(request_line.contains("bounded=1"));
    assert!(head.to_lowercase().contains("user-agent: airwatch_tui/"));
}

#[tokio::test]
async fn geocoder_empty_result_is_none() {
    let (base, _server) = serve_once("200 OK", "[]").await;

    let geocoder = Geocoder::new(base, TIMEOUT).unwrap();
    let request = GeocodeRequest::new("Atlantis").unwrap();

    assert_eq!(geocoder.search(&request).await, Ok(None));
}

#[tokio::test]
async fn geocoder_http_error_is_reported() {
    let (base, _server) = serve_once("503 Service Unavailable", "").await;

    let geocoder = Geocoder::new(base, TIMEOUT).unwrap();
    let request = GeocodeRequest::new("Adyar").unwrap();

    assert_eq!(
        geocoder.search(&request).await,
        Err(GeocodeError::Status(503))
    );
}
