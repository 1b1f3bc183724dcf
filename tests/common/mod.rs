use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;

/// Small dataset covering every ECO category, both winners and a draw.
pub const SAMPLE_CSV: &str = "\
white_rating,black_rating,winner,opening_eco,opening_name,moves
1300,1250,white,C50,Italian Game,e4 e5 Nf3 Nc6 Bc4 Bc5 c3 Nf6
1350,1500,black,C50,Italian Game,e4 e5 Nf3 Nc6 Bc4 Nf6 d3 Bc5
1600,1620,draw,D02,London System,d4 d5 Nf3 Nf6 Bf4 e6
950,900,white,A00,Polish Opening,b4 e5 Bb2 Bxb4 Bxe5 Nf6
2000,1980,black,B20,Sicilian Defence,e4 c5 Nf3 d6 Bb5+ Bd7
1450,1400,white,E60,King's Indian Defence,d4 Nf6 c4 g6 Nc3 Bg7
";

/// Build a reqwest client for tests.
pub fn client() -> Client {
    Client::new()
}

/// Generate a unique suffix based on the current timestamp to avoid
/// collisions between test dataset files.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}", ts % 1_000_000_000)
}

/// Write a temp CSV dataset and return its path.
pub fn write_dataset(csv: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("explorer-e2e-{}.csv", unique_suffix()));
    std::fs::write(&path, csv).expect("write test dataset");
    path
}

/// Spawn the API in-process on an ephemeral port and return its base URL.
pub async fn spawn_server(csv: &str) -> String {
    let path = write_dataset(csv);
    let records = explorer_core::dataset::load_dataset(&path).expect("load test dataset");
    let state = server::state::AppState::new(records);
    let app = server::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{addr}")
}
