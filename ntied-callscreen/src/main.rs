#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use ntied_callscreen::ui::{CallApp, WINDOW_HEIGHT, WINDOW_WIDTH};
use tracing_subscriber::prelude::*;

fn main() -> iced::Result {
    // Initialize tracing (optional, controlled via RUST_LOG)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ntied_callscreen=info,iced=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    iced::application(CallApp::title, CallApp::update, CallApp::view)
        .subscription(CallApp::subscription)
        .theme(|_| iced::Theme::Dark)
        .window_size((WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32))
        .run_with(CallApp::new)
}
