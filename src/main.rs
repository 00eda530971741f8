mod config;
mod pager;
mod routes;
mod services;
mod state;
mod table;
mod views;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env();
    let port = config.port;

    let state = state::AppState::new(config);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "arpa-admin listening");
    axum::serve(listener, app).await.expect("server failed");
}
