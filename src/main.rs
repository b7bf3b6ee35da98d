mod app;
mod charts;
mod config;
mod message;
mod report;
mod screens;
mod theme;

use app::App;
use clap::Parser;
use iced::Settings;
use lucide_icons::LUCIDE_FONT_BYTES;
use tracing::{error, info};

use config::{load_context, open_storage, Args, ReportConfig};

fn main() -> iced::Result {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hr_onboarding_report=info")),
        )
        .init();

    let context = match args.context.as_deref().map(load_context) {
        Some(Ok(context)) => {
            info!("report context loaded");
            Some(context)
        }
        Some(Err(err)) => {
            error!(%err, "ignoring report context");
            None
        }
        None => None,
    };
    let config = ReportConfig::for_variant(args.variant);
    let storage = open_storage(&config, &args);

    iced::application(
        move || App::new(config.clone(), context.clone(), storage.clone()),
        App::update,
        App::view,
    )
    .title("Employee Trend")
    .theme(App::theme)
    .settings(Settings {
        fonts: vec![LUCIDE_FONT_BYTES.into()],
        ..Default::default()
    })
    .window_size((1024.0, 768.0))
    .run()
}
