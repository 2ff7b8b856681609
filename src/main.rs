mod api;
mod config;
mod db;
mod helper_model;
mod methods;
mod model;
mod storefront;

use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_thread_names(true)
        .init();

    let storefront = storefront::Storefront::from_config(&config);
    tracing::info!(
        addr = %config.addr,
        latency_scale = config.latency_scale,
        status_policy = ?config.status_policy,
        booking_horizon_days = config.booking_horizon_days,
        "starting storefront"
    );

    // routing for the server
    let httpd = api::api(storefront, config.booking_horizon_days).and(warp::path::end());
    warp::serve(httpd).run(config.addr).await;
    Ok(())
}
