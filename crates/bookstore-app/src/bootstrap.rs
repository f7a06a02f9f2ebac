use std::net::SocketAddr;
use std::sync::Arc;

use bookstore_api::ApiServer;
use bookstore_config::{LogFormatSetting, ServerConfig};
use bookstore_core::{Author, Book, Catalog, Category, Entity};
use bookstore_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, Metrics};
use tracing::{error, info};

use crate::error::{AppError, AppResult};

const BUILD_SHA: &str = match option_env!("BOOKSTORE_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Dependencies required to bootstrap the bookstore application.
pub(crate) struct BootstrapDependencies {
    config: ServerConfig,
    catalog: Arc<Catalog>,
    telemetry: Metrics,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        let config =
            ServerConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
        Self::with_config(config)
    }

    pub(crate) fn with_config(config: ServerConfig) -> AppResult<Self> {
        let telemetry =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        Ok(Self {
            config,
            catalog: Arc::new(Catalog::seeded()),
            telemetry,
        })
    }
}

/// Entry point for the bookstore boot sequence.
///
/// # Errors
///
/// Returns an error if configuration is invalid, telemetry cannot be
/// installed, or the listener fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Boot sequence that relies entirely on injected dependencies.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies {
        config,
        catalog,
        telemetry,
    } = dependencies;

    let logging = LoggingConfig {
        level: &config.log_level,
        format: log_format(config.log_format),
        build_sha: BUILD_SHA,
    };
    bookstore_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let addr = config.socket_addr();
    let _context = GlobalContextGuard::new(addr);
    announce(addr);

    let api = ApiServer::new(catalog, telemetry);
    api.serve(addr).await.map_err(|err| {
        error!(error = %err, "api server stopped");
        AppError::api_server("api_server.serve", err)
    })
}

fn log_format(setting: Option<LogFormatSetting>) -> LogFormat {
    LogFormat::from_name(setting.map(LogFormatSetting::as_str))
}

fn announce(addr: SocketAddr) {
    info!(%addr, "bookstore api listening");
    for route in route_table() {
        info!(route = %route, "available endpoint");
    }
}

/// Every CRUD route in the order the listener announces them.
pub(crate) fn route_table() -> Vec<String> {
    [Book::COLLECTION, Author::COLLECTION, Category::COLLECTION]
        .into_iter()
        .flat_map(|collection| {
            [
                format!("GET /{collection}"),
                format!("GET /{collection}/{{id}}"),
                format!("POST /{collection}"),
                format!("PUT /{collection}/{{id}}"),
                format!("DELETE /{collection}/{{id}}"),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::net::{Ipv4Addr, TcpListener};

    #[test]
    fn route_table_covers_every_collection() {
        let routes = route_table();
        assert_eq!(routes.len(), 15);
        assert_eq!(routes[0], "GET /books");
        assert_eq!(routes[6], "GET /authors/{id}");
        assert_eq!(routes[14], "DELETE /categories/{id}");
    }

    #[test]
    fn log_format_follows_setting() {
        assert_eq!(log_format(Some(LogFormatSetting::Json)), LogFormat::Json);
        assert_eq!(log_format(Some(LogFormatSetting::Pretty)), LogFormat::Pretty);
        assert_eq!(log_format(None), LogFormat::infer());
    }

    #[test]
    fn with_config_seeds_catalog() -> Result<(), Box<dyn Error>> {
        let deps = BootstrapDependencies::with_config(ServerConfig::default())?;
        assert_eq!(deps.catalog.counts().books, 2);
        assert_eq!(deps.config.http_port, 3000);
        Ok(())
    }

    #[tokio::test]
    async fn run_app_with_reports_bind_failure() -> Result<(), Box<dyn Error>> {
        let occupied = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
        let config = ServerConfig {
            bind_addr: Ipv4Addr::LOCALHOST.into(),
            http_port: occupied.local_addr()?.port(),
            ..ServerConfig::default()
        };
        let deps = BootstrapDependencies::with_config(config)?;

        let result = run_app_with(deps).await;
        assert!(matches!(
            result,
            Err(AppError::ApiServer {
                operation: "api_server.serve",
                ..
            })
        ));
        Ok(())
    }
}
