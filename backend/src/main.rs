mod config;
mod services;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info, warn};
use mime_guess::from_path;

use crate::config::Config;
use crate::services::upload_pdf::{self, FlashcardGenerator, HttpGenerator, UploadLimits};

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the bundled frontend; unknown paths fall back to `index.html`.
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
            None => HttpResponse::NotFound().body("Frontend bundle not found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let url = config.url();

    let generator = HttpGenerator::new(config.generator_url.clone(), config.generator_timeout)
        .map_err(|err| {
            error!("Could not build the generator client: {}", err);
            io::Error::other(err)
        })?;
    let generator: Arc<dyn FlashcardGenerator> = Arc::new(generator);
    let generator = web::Data::from(generator);
    let limits = web::Data::new(UploadLimits {
        max_bytes: config.max_upload_bytes,
    });

    if config.open_browser {
        let browser_url = url.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            if let Err(err) = webbrowser::open(&browser_url) {
                warn!("Could not open a browser at {}: {}", browser_url, err);
            }
        });
    }

    info!("Server running at {}", url);
    info!(
        "Relaying uploads to {} (timeout {}s, limit {} bytes)",
        config.generator_url,
        config.generator_timeout.as_secs(),
        config.max_upload_bytes
    );

    HttpServer::new(move || {
        App::new()
            .app_data(generator.clone())
            .app_data(limits.clone())
            .service(upload_pdf::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
