//! Axum web server with WebSocket streaming for visualization.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sortscope_steps::{catalog, AlgorithmId, AlgorithmInfo};
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{StepHistory, StepSnapshot};
use crate::player::Player;
use crate::playback::PlaybackStatus;
use crate::scheduler::TokioScheduler;
use crate::session::ConfigUpdate;

/// Shared application state.
pub struct AppState {
    player: Player<TokioScheduler>,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a new visualization server around a player.
    pub fn new(player: Player<TokioScheduler>) -> Self {
        Self {
            state: Arc::new(AppState { player }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            // API routes
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/status", get(status_handler))
            .route("/api/snapshot", get(snapshot_handler))
            .route("/api/history", get(history_handler))
            .route("/api/start", post(start_handler))
            .route("/api/pause", post(pause_handler))
            .route("/api/reset", post(reset_handler))
            .route("/api/algorithm", post(algorithm_handler))
            .route("/api/config", post(config_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Serve on `addr` until the listener fails.
    pub async fn serve(self, addr: std::net::SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Visualization server running on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Serve the bundled frontend.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn algorithms_handler() -> Json<Vec<AlgorithmInfo>> {
    Json(catalog())
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.player.status())
}

async fn snapshot_handler(State(state): State<Arc<AppState>>) -> Json<StepSnapshot> {
    Json(state.player.snapshot())
}

async fn history_handler(State(state): State<Arc<AppState>>) -> Json<StepHistory> {
    Json(state.player.history())
}

async fn start_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.player.start();
    Json(state.player.status())
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.player.pause();
    Json(state.player.status())
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    state.player.reset();
    Json(state.player.status())
}

#[derive(Deserialize)]
struct AlgorithmRequest {
    algorithm: String,
}

async fn algorithm_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AlgorithmRequest>,
) -> std::result::Result<Json<PlaybackStatus>, StatusCode> {
    let algorithm: AlgorithmId = req.algorithm.parse().map_err(|e| {
        debug!("rejected algorithm: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    state.player.set_algorithm(algorithm);
    Ok(Json(state.player.status()))
}

async fn config_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> Json<PlaybackStatus> {
    state.player.set_config(update);
    Json(state.player.status())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");
    let mut snapshots = state.player.subscribe();

    let initial = WsResponse::Snapshot(state.player.snapshot());
    if send_response(&mut socket, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = match serde_json::from_str::<WsCommand>(&text) {
                            Ok(cmd) => handle_ws_command(&state, cmd),
                            Err(e) => WsResponse::Error {
                                message: Error::from(e).to_string(),
                            },
                        };
                        if send_response(&mut socket, &response).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }
            published = snapshots.recv() => {
                let response = match published {
                    Ok(snapshot) => WsResponse::Snapshot(snapshot),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "WebSocket client lagging, resyncing");
                        WsResponse::Snapshot(state.player.snapshot())
                    }
                    Err(RecvError::Closed) => break,
                };
                if send_response(&mut socket, &response).await.is_err() {
                    break;
                }
            }
        }
    }
    debug!("WebSocket client disconnected");
}

async fn send_response(
    socket: &mut WebSocket,
    response: &WsResponse,
) -> std::result::Result<(), ()> {
    let message = encode(response).map_err(|e| warn!("Failed to encode response: {}", e))?;
    socket
        .send(message)
        .await
        .map_err(|e| warn!("Failed to send response: {}", e))
}

fn encode(response: &WsResponse) -> Result<Message> {
    Ok(Message::Text(serde_json::to_string(response)?.into()))
}

/// Commands accepted over the WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    Start,
    Pause,
    Reset,
    SetAlgorithm { algorithm: String },
    SetConfig {
        #[serde(default)]
        size: Option<usize>,
        #[serde(default)]
        speed: Option<u32>,
    },
    GetStatus,
    GetSnapshot,
    GetHistory,
}

/// Responses sent over the WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Snapshot(StepSnapshot),
    Status(PlaybackStatus),
    History(StepHistory),
    Error { message: String },
}

fn handle_ws_command(state: &AppState, cmd: WsCommand) -> WsResponse {
    let player = &state.player;
    match cmd {
        WsCommand::Start => {
            player.start();
        }
        WsCommand::Pause => {
            player.pause();
        }
        WsCommand::Reset => player.reset(),
        WsCommand::SetAlgorithm { algorithm } => match algorithm.parse() {
            Ok(id) => player.set_algorithm(id),
            Err(e) => {
                return WsResponse::Error {
                    message: Error::from(e).to_string(),
                }
            }
        },
        WsCommand::SetConfig { size, speed } => {
            player.set_config(ConfigUpdate { size, speed });
        }
        WsCommand::GetSnapshot => return WsResponse::Snapshot(player.snapshot()),
        WsCommand::GetHistory => return WsResponse::History(player.history()),
        WsCommand::GetStatus => {}
    }
    WsResponse::Status(player.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{PlaybackController, PlaybackState};
    use crate::session::{InputSource, SessionConfig};

    fn state() -> Arc<AppState> {
        let controller =
            PlaybackController::with_inputs(SessionConfig::new(8, 100), InputSource::seeded(1));
        Arc::new(AppState {
            player: Player::new(controller, TokioScheduler),
        })
    }

    #[tokio::test]
    async fn router_builds() {
        let controller = PlaybackController::new(SessionConfig::default());
        let server = VisServer::new(Player::new(controller, TokioScheduler));
        let _router = server.router();
    }

    #[tokio::test]
    async fn http_intents_drive_playback() {
        let state = state();

        let Json(status) = start_handler(State(state.clone())).await;
        assert_eq!(status.state, PlaybackState::Running);

        let Json(status) = pause_handler(State(state.clone())).await;
        assert_eq!(status.state, PlaybackState::Paused);

        let Json(status) = reset_handler(State(state.clone())).await;
        assert_eq!(status.state, PlaybackState::Idle);
        assert_eq!(status.label, "Ready");
    }

    #[tokio::test]
    async fn unknown_algorithm_is_bad_request() {
        let state = state();
        let result = algorithm_handler(
            State(state.clone()),
            Json(AlgorithmRequest {
                algorithm: "bogo".to_string(),
            }),
        )
        .await;
        assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));

        let Json(status) = algorithm_handler(
            State(state),
            Json(AlgorithmRequest {
                algorithm: "heap".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status.algorithm, AlgorithmId::HeapSort);
    }

    #[tokio::test]
    async fn config_handler_resets_on_size_change() {
        let state = state();
        let Json(status) = config_handler(
            State(state.clone()),
            Json(ConfigUpdate {
                size: Some(15),
                speed: None,
            }),
        )
        .await;
        assert_eq!(status.size, 15);
        assert_eq!(state.player.snapshot().array.len(), 15);
    }

    #[tokio::test]
    async fn serve_reports_bind_failure_as_io_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();

        let controller = PlaybackController::new(SessionConfig::default());
        let server = VisServer::new(Player::new(controller, TokioScheduler));
        let err = server.serve(addr).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn malformed_command_reports_serialization_error() {
        let err = serde_json::from_str::<WsCommand>("{\"type\":").unwrap_err();
        let message = Error::from(err).to_string();
        assert!(message.starts_with("Serialization error"));

        let message = encode(&WsResponse::Error { message }).unwrap();
        assert!(matches!(message, Message::Text(_)));
    }

    #[test]
    fn ws_commands_parse() {
        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"set_config","speed":150}"#).unwrap();
        assert!(matches!(cmd, WsCommand::SetConfig { size: None, speed: Some(150) }));

        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"set_algorithm","algorithm":"merge-sort"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::SetAlgorithm { .. }));

        assert!(serde_json::from_str::<WsCommand>(r#"{"type":"rewind"}"#).is_err());
    }

    #[tokio::test]
    async fn ws_command_responses() {
        let state = state();

        let response = handle_ws_command(&state, WsCommand::Start);
        assert!(matches!(response, WsResponse::Status(ref s) if s.state == PlaybackState::Running));

        let response = handle_ws_command(
            &state,
            WsCommand::SetAlgorithm {
                algorithm: "bogo".to_string(),
            },
        );
        assert!(matches!(response, WsResponse::Error { .. }));

        let response = handle_ws_command(&state, WsCommand::GetHistory);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with(r#"{"type":"history""#));
    }
}
