use mock_server::{sample_records, MockPipedrive};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("MOCK_API_TOKEN").unwrap_or_else(|_| "test-token".to_string());
    let addr = format!("127.0.0.1:{port}");

    let server = MockPipedrive::new(&token)
        .with_collection("deals", sample_records("deal", 1234))
        .with_collection("activities", sample_records("activity", 500))
        .with_collection("persons", sample_records("person", 3))
        .with_collection("organizations", Vec::new());

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock pipedrive listening");
    server.run(listener).await
}
