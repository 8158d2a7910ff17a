#![forbid(unsafe_code)]

mod config;
mod router;

use std::{net::SocketAddr, sync::Arc};

use diesel_async::pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager};
use dotenvy::dotenv;
use listenfd::ListenFd;
use web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut listenfd = ListenFd::from_env();

    let tcp_socket: Option<std::net::TcpListener> = match listenfd.take_tcp_listener(0) {
        Ok(socket) => socket,
        Err(_) => None,
    };

    let config = config::process_config()?;

    let manager = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(
        config.database.uri.clone(),
    );
    let db_pool = Pool::builder(manager).build()?;
    let mut connection = db_pool.get().await?;

    db::migrations::run_migrations(&mut connection).await?; // run all pending migrations
    drop(connection);

    let addr = SocketAddr::new(config.web.host.parse()?, config.web.port);

    let state = Arc::new(AppState { db_pool, config });

    let app = router::app(Arc::clone(&state));

    log::info!("tellme is listening on {}", addr);

    match tcp_socket {
        // cargo-watch thing
        Some(listener) => axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap(),
        None => {
            axum::Server::bind(&addr)
                .serve(app.into_make_service())
                .await
                .unwrap()
        }
    };

    Ok(())
}
