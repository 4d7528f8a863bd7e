mod config;
mod services;
mod wizard_controller;

use crate::config::{AppConfig, JSON_PAYLOAD_LIMIT};
use crate::wizard_controller::state::WizardsState;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

/// Periodically clears wizard sessions that were abandoned mid-way.
fn spawn_session_sweeper(state: WizardsState) {
    let period = state.ttl().min(SWEEP_INTERVAL);
    actix_web::rt::spawn(async move {
        let mut ticker = actix_web::rt::time::interval(period);
        loop {
            ticker.tick().await;
            state.evict_expired().await;
        }
    });
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();
    let url = config.url();

    std::fs::create_dir_all(&config.upload_dir)?;

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    let wizards_state = WizardsState::with_ttl(config.session_ttl);
    spawn_session_sweeper(wizards_state.clone());
    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);

    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(JSON_PAYLOAD_LIMIT))
            .app_data(web::Data::new(wizards_state.clone()))
            .app_data(config.clone())
            .service(services::wizard::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind(bind)?
        .run()
        .await
}
