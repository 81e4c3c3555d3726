#[tokio::main]
async fn main() {
    freshmart_observability::init();

    let config = freshmart_api::config::ApiConfig::from_env();

    let app = freshmart_api::app::build_app(&config)
        .await
        .expect("failed to wire application services");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
