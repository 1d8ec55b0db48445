use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use kviz_server::{
    app_state::AppState,
    config::Config,
    handlers::{generate_quiz, health_check},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    config.warn_if_incomplete();

    let bind_address = (config.web_server_host.clone(), config.web_server_port);
    let state = AppState::new(config);

    log::info!(
        "starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        // The quiz player is a static page on another origin; the generation
        // endpoint is the only thing it calls over here.
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(generate_quiz)
            .service(health_check)
    })
    .bind(bind_address)?
    .run()
    .await
}
