//! Hive Desktop Application
//!
//! The notes screen and the sign-in screen in a desktop window.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod markdown;
mod services;
mod state;
mod theme;
mod views;

use dioxus::desktop::{Config, WindowBuilder};

fn main() {
    // Local overrides for the Supabase endpoint
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hive=debug".parse().expect("valid log directive")),
        )
        .init();

    tracing::info!("Starting Hive...");

    let window = WindowBuilder::new()
        .with_title("Hive")
        .with_resizable(true);
    let config = Config::new().with_window(window);

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
