//! Sortscope Visualization Server
//!
//! Serve the sorting playback frontend.

use sortscope_steps::GeneratorRegistry;
use sortscope_vis::{InputSource, PlaybackController, Player, TokioScheduler, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sortscope_vis=info,sortscope_steps=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Environment first, positional [size] [port] override
    let config = VisConfig::from_env()?.with_args(std::env::args().skip(1))?;

    let inputs = match config.seed {
        Some(seed) => InputSource::seeded(seed),
        None => InputSource::from_entropy(),
    };
    let registry = if config.faithful {
        GeneratorRegistry::faithful()
    } else {
        GeneratorRegistry::default()
    };

    tracing::info!(
        size = config.session.size(),
        speed = config.session.speed(),
        algorithm = %config.algorithm,
        faithful = config.faithful,
        "Starting Sortscope"
    );

    let controller = PlaybackController::with_inputs(config.session, inputs)
        .with_registry(registry)
        .with_algorithm(config.algorithm);
    let player = Player::new(controller, TokioScheduler);

    VisServer::new(player).serve(config.addr).await?;

    Ok(())
}
