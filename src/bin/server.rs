use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use tower_http::services::ServeDir;

use lifegif::config::Params;
use lifegif::error::Error;
use lifegif::grid::LifeGrid;

#[derive(Deserialize)]
struct SimulateRequest {
    /// `random` (default) or `image`.
    source: Option<String>,
    image_path: Option<String>,
    #[serde(flatten)]
    params: Params,
}

#[derive(Serialize)]
struct SimulateResponse {
    gif: String,
    width: usize,
    height: usize,
    frames: usize,
    population: Vec<usize>,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

type ApiError = (StatusCode, String);

fn bad_request(e: Error) -> ApiError {
    warn!("rejected request: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn encode_data_url(gif: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(gif);
    format!("data:image/gif;base64,{}", b64)
}

async fn simulate_handler(
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let params = req.params;
    let initial = match (req.source.as_deref(), req.image_path) {
        (None | Some("random"), _) => params.random_state(),
        (Some("image"), Some(path)) => params.image_state(path),
        (Some("image"), None) => {
            return Err((StatusCode::BAD_REQUEST, "image source needs image_path".into()));
        }
        (Some(other), _) => {
            return Err((StatusCode::BAD_REQUEST, format!("unknown source {:?}", other)));
        }
    };

    let response = tokio::task::spawn_blocking(move || {
        let (anim, timings) = lifegif::generate(&initial, &params).map_err(bad_request)?;

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        Ok::<_, ApiError>(SimulateResponse {
            gif: encode_data_url(&anim.gif),
            width: anim.w,
            height: anim.h,
            frames: anim.frames.len(),
            population: anim.frames.iter().map(LifeGrid::population).collect(),
            timings: timing_entries,
        })
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;

    Ok(Json(response))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Info).init() {
        eprintln!("failed to initialise logging: {}", e);
    }

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/simulate", post(simulate_handler))
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("lifegif server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
