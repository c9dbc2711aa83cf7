use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use workflow_config::{AppConfig, LogFormat};

use crate::app::Application;
use crate::shutdown::ShutdownManager;

/// 等待应用关闭的最长时间
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// 命令行传入的启动参数
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub config_path: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

/// 初始化日志系统，`RUST_LOG` 优先于配置的级别
pub fn init_logging(log_level: &str, log_format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("初始化JSON日志格式失败")?;
        }
        LogFormat::Pretty => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("初始化Pretty日志格式失败")?;
        }
    }

    Ok(())
}

pub fn parse_log_format(value: &str) -> Result<LogFormat> {
    match value {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        _ => Err(anyhow!("不支持的日志格式: {value}")),
    }
}

/// 加载配置并应用命令行覆盖
pub fn load_config(startup_config: &StartupConfig) -> Result<AppConfig> {
    let mut config = AppConfig::load(startup_config.config_path.as_deref()).with_context(|| {
        format!(
            "加载配置文件失败: {}",
            startup_config.config_path.as_deref().unwrap_or("<default>")
        )
    })?;

    if let Some(ref level) = startup_config.log_level {
        config.observability.log_level = level.clone();
    }
    if let Some(ref format) = startup_config.log_format {
        config.observability.log_format = parse_log_format(format)?;
    }

    Ok(config)
}

/// 启动应用程序，阻塞直到收到关闭信号并完成关闭
pub async fn start_application(startup_config: StartupConfig) -> Result<()> {
    let config = load_config(&startup_config)?;
    init_logging(
        &config.observability.log_level,
        config.observability.log_format,
    )?;

    info!("启动拉取式任务调度系统");
    if let Some(ref path) = startup_config.config_path {
        info!("配置文件: {path}");
    }

    let app = Arc::new(Application::new(config)?);
    run_until_shutdown(app, wait_for_shutdown_signal()).await?;

    info!("拉取式任务调度系统已退出");
    Ok(())
}

/// 运行应用直到 `shutdown_signal` 完成，然后优雅关闭
///
/// 应用在信号到来之前退出时返回错误，例如API地址绑定失败。
pub async fn run_until_shutdown<F>(app: Arc<Application>, shutdown_signal: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let shutdown_manager = ShutdownManager::new();

    let mut app_handle = {
        let shutdown_rx = shutdown_manager.subscribe().await;
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.run(shutdown_rx).await })
    };

    tokio::select! {
        _ = shutdown_signal => {
            info!("收到关闭信号，开始优雅关闭...");
        }
        result = &mut app_handle => {
            return match result {
                Ok(Ok(())) => Err(anyhow!("应用在收到关闭信号前退出")),
                Ok(Err(e)) => {
                    error!("应用运行失败: {e:#}");
                    Err(e.context("应用启动失败"))
                }
                Err(e) => Err(anyhow!("应用任务异常退出: {e}")),
            };
        }
    }

    shutdown_manager.shutdown().await;

    match tokio::time::timeout(SHUTDOWN_TIMEOUT, app_handle).await {
        Ok(Ok(Ok(()))) => info!("应用已优雅关闭"),
        Ok(Ok(Err(e))) => return Err(e.context("应用关闭时发生错误")),
        Ok(Err(e)) => error!("应用任务异常退出: {e}"),
        Err(_) => warn!(in_flight = app.scheduler().in_flight(), "应用关闭超时，强制退出"),
    }

    Ok(())
}

/// 等待 Ctrl+C 或 SIGTERM
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("安装Ctrl+C信号处理器失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("安装SIGTERM信号处理器失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("收到Ctrl+C信号");
        },
        _ = terminate => {
            info!("收到SIGTERM信号");
        },
    }
}
