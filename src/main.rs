use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use verifi_check::config::{DatabaseConfig, EnvironmentConfig};
use verifi_check::controllers::AuthController;
use verifi_check::create_app;
use verifi_check::database::DatabaseConnection;
use verifi_check::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("configuración inválida")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Verifi-Check - Panel de verificación vehicular");
    info!("================================================");
    info!("⚙️ Entorno: {}", config.environment);

    let db_config = DatabaseConfig::from(&config);
    let db_connection = match DatabaseConnection::connect(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    db_connection
        .run_migrations()
        .await
        .context("error aplicando migraciones")?;

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .context("HOST/PORT inválidos")?;

    let state = AppState::postgres(db_connection.pool().clone(), config);
    bootstrap_admin(&state).await?;

    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Iniciar sesión");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("   POST /api/auth/logout - Cerrar sesión");
    info!("🚗 Vehículos:");
    info!("   GET    /api/vehicles?q= - Registros de hoy / búsqueda");
    info!("   POST   /api/vehicles - Crear registro");
    info!("   GET    /api/vehicles/:id - Obtener registro");
    info!("   PUT    /api/vehicles/:id - Actualizar registro");
    info!("   DELETE /api/vehicles/:id - Eliminar registro");
    info!("   GET    /api/vehicles/suggestion - Sugerir tipo de prueba");
    info!("📋 Reglas de marca:");
    info!("   GET  /api/brand-rules - Listar reglas");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Crea la cuenta inicial definida en ADMIN_EMAIL / ADMIN_PASSWORD
async fn bootstrap_admin(state: &AppState) -> Result<()> {
    let (Some(email), Some(password)) = (&state.config.admin_email, &state.config.admin_password) else {
        warn!("⚠️ ADMIN_EMAIL/ADMIN_PASSWORD no definidos, no se crea cuenta inicial");
        return Ok(());
    };

    let user = AuthController::new(state)
        .ensure_account(email, password)
        .await
        .map_err(|e| anyhow::anyhow!("Error creando cuenta inicial: {}", e))?;
    info!("👤 Cuenta inicial lista: {}", user.email);
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
