use std::sync::Arc;

use eframe::egui;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use workout_board::app::WorkoutApp;
use workout_board::view::TITLE;
use workout_board::{Config, Dispatcher, HttpWorkoutApi, WorkoutApi};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let http = HttpWorkoutApi::new(&config.base_url)?;
    info!("using workout service at {}", http.base_url());
    let api: Arc<dyn WorkoutApi> = Arc::new(http);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |cc| {
            Ok(Box::new(WorkoutApp::new(cc, |ctx| {
                Dispatcher::new(api, Some(ctx))
            })))
        }),
    )?;
    Ok(())
}
