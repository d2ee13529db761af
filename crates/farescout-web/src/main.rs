use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use farescout_core::{
    AmadeusClient, ClientCredentials, EngineConfig, HttpClient, RateGate, ReqwestHttpClient,
    SuggestionEngine, TokenCache,
};
use farescout_web::auth::AllowAllAuthenticator;
use farescout_web::config::Config;
use farescout_web::postcode::PostcodesIoGeocoder;
use farescout_web::{app, AppState};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farescout_web=debug,farescout_core=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("failed to load configuration from environment");

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let tokens = Arc::new(TokenCache::new(
        config.amadeus_base_url.clone(),
        ClientCredentials {
            client_id: config.amadeus_client_id.clone(),
            client_secret: config.amadeus_client_secret.clone(),
        },
        Arc::clone(&http),
    ));
    let api = Arc::new(
        AmadeusClient::new(config.amadeus_base_url.clone(), Arc::clone(&http), tokens)
            .with_rate_gate(RateGate::new(
                Duration::from_secs(1),
                config.search_quota_per_second,
            )),
    );
    let geocoder = Arc::new(PostcodesIoGeocoder::new(Arc::clone(&http)));

    let engine = Arc::new(SuggestionEngine::new(
        api,
        geocoder,
        EngineConfig {
            radius_km: config.airport_radius_km,
            currency: config.currency.clone(),
        },
    ));

    let state = AppState {
        engine,
        authenticator: Arc::new(AllowAllAuthenticator),
    };
    let app = app(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
