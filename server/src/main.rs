use std::sync::Arc;

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::tracing::init();

    let app = app::app::ClipBuilder::new()?
        .build()
        .context("could not build app")?;
    let bind = app.config.bind_address();
    let router = server::routes::router(Arc::new(app));

    log::info!("cliptube server listening on {}", bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("could not bind {}", bind))?;
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
