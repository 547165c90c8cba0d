//! sheetstore REST server

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing::info;

use sheetstore_server::config::ServerArgs;
use sheetstore_server::routes;
use sheetstore_server::service::SheetService;
use sheetstore_server::storage::FileStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = ServerArgs::parse();

    let store = FileStore::open(&args.db)
        .with_context(|| format!("Failed to open database '{}'", args.db.display()))?;
    let service = web::Data::new(SheetService::new(store));

    info!(bind = %args.bind, port = args.port, db = %args.db.display(), "starting sheetstore server");

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind((args.bind.as_str(), args.port))
    .with_context(|| format!("Failed to bind {}:{}", args.bind, args.port))?
    .run()
    .await?;

    Ok(())
}
