use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use tasklist::auth::{TokenService, AUTH_TOKEN_HEADER};
use tasklist::config::Config;
use tasklist::routes::{self, health};
use tasklist::store::{MemoryStore, PgStore, Store};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("{}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pg = PgStore::connect(url).await.map_err(|e| {
                log::error!("Could not connect to the database: {}", e);
                io::Error::new(io::ErrorKind::Other, e.to_string())
            })?;
            Arc::new(pg)
        }
        None => {
            log::warn!("DATABASE_URL is not set; data is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    let store = web::Data::from(store);
    let tokens = web::Data::new(TokenService::new(&config.jwt_private_key));

    log::info!("Listening on {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(tokens.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .expose_headers([AUTH_TOKEN_HEADER])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
