use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, sync::broadcast, task::JoinHandle};
use tracing::{error, info, warn};
use workflow_api::{create_app, AppState};
use workflow_config::AppConfig;
use workflow_core::{
    ArticleRecord, EndpointRecord, EndpointTask, TaskExecutor, WorkFinder, WorkSource,
};
use workflow_dispatcher::{
    EndpointWorkFinder, SchedulerSettings, ShutdownOutcome, WorkScheduler, Worker,
};
use workflow_infrastructure::{ArticleDataGateway, EndpointDataGateway};
use workflow_worker::{EndpointWorker, HttpFetcher, ReqwestFetcher};

/// 主应用程序
///
/// 组装存储、调度器和只读API，`run` 负责它们的启动和关闭顺序。
pub struct Application {
    config: AppConfig,
    articles: ArticleDataGateway,
    endpoints: EndpointDataGateway,
    scheduler: Arc<WorkScheduler<EndpointTask>>,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self> {
        let fetcher = ReqwestFetcher::new(
            Duration::from_secs(config.http.request_timeout_seconds),
            &config.http.user_agent,
        )
        .context("创建HTTP客户端失败")?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// 使用指定的下载器组装应用
    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn HttpFetcher>) -> Result<Self> {
        info!(
            workers = config.scheduler.workers.len(),
            endpoints = config.endpoints.len(),
            "初始化应用程序"
        );

        let endpoints = EndpointDataGateway::new(
            config
                .endpoints
                .iter()
                .map(|e| EndpointRecord::ready(e.url.clone(), e.accept.clone()))
                .collect(),
        );
        let articles = ArticleDataGateway::new(
            config
                .articles
                .iter()
                .map(|a| ArticleRecord::new(a.id, a.title.clone(), a.available))
                .collect(),
        );

        let workers: Vec<Worker<EndpointTask>> = config
            .scheduler
            .workers
            .iter()
            .map(|name| {
                let executor: Arc<dyn TaskExecutor<EndpointTask>> = Arc::new(
                    EndpointWorker::new(name.clone(), Arc::clone(&fetcher), articles.clone()),
                );
                Worker::new(name.clone(), executor)
            })
            .collect();

        let settings = SchedulerSettings::new(
            config.scheduler.poll_delay_seconds,
            config.scheduler.execution_pool_size,
        )?;
        let finder: Arc<dyn WorkFinder<EndpointTask>> =
            Arc::new(EndpointWorkFinder::new(Arc::new(endpoints.clone())));
        let scheduler = WorkScheduler::new(finder, workers, settings)?;

        Ok(Self {
            config,
            articles,
            endpoints,
            scheduler: Arc::new(scheduler),
        })
    }

    pub fn scheduler(&self) -> &Arc<WorkScheduler<EndpointTask>> {
        &self.scheduler
    }

    pub fn articles(&self) -> &ArticleDataGateway {
        &self.articles
    }

    pub fn endpoints(&self) -> &EndpointDataGateway {
        &self.endpoints
    }

    /// 运行直到收到关闭信号
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let api_handle = if self.config.api.enabled {
            Some(self.start_api(shutdown_rx.resubscribe()).await?)
        } else {
            info!("API服务器已禁用");
            None
        };

        let reset_handle = self.config.scheduler.reset_interval_seconds.map(|secs| {
            let source: Arc<dyn WorkSource> = Arc::new(self.endpoints.clone());
            tokio::spawn(run_reset_loop(
                source,
                Duration::from_secs(secs),
                shutdown_rx.resubscribe(),
            ))
        });

        self.scheduler.start();

        let _ = shutdown_rx.recv().await;
        info!("开始关闭应用组件");

        match self.scheduler.shutdown().await {
            ShutdownOutcome::Drained => info!("调度器已排空并停止"),
            ShutdownOutcome::NotRunning => warn!("调度器未在运行"),
        }

        for handle in [api_handle, reset_handle].into_iter().flatten() {
            if let Err(e) = handle.await {
                error!(error = %e, "后台任务异常退出");
            }
        }

        info!("应用组件已全部停止");
        Ok(())
    }

    async fn start_api(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<JoinHandle<()>> {
        let state = AppState {
            articles: self.articles.clone(),
            endpoints: self.endpoints.clone(),
        };
        let app = create_app(state, self.config.api.cors_enabled);

        let bind_address = self.config.api.bind_address.as_str();
        let listener = TcpListener::bind(bind_address)
            .await
            .with_context(|| format!("绑定地址失败: {bind_address}"))?;
        info!("API服务器启动在: {bind_address}");

        Ok(tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            });
            if let Err(e) = server.await {
                error!(error = %e, "API服务器运行失败");
            }
            info!("API服务器已停止");
        }))
    }
}

/// 定期把所有端点重置为就绪
async fn run_reset_loop(
    source: Arc<dyn WorkSource>,
    every: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(every);
    // first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match source.reset_all().await {
                    Ok(()) => info!("所有端点已重置为就绪"),
                    Err(e) => error!(error = %e, "重置端点失败"),
                }
            }
            _ = shutdown_rx.recv() => {
                info!("端点重置循环停止");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workflow_core::EndpointStatus;

    #[tokio::test]
    async fn test_reset_loop_restores_ready_until_shutdown() {
        let gateway = EndpointDataGateway::new(vec![EndpointRecord::ready(
            "http://localhost/feed",
            "application/rss+xml",
        )]);
        gateway.mark_completed("http://localhost/feed").await.unwrap();

        let (tx, rx) = broadcast::channel(1);
        let handle = tokio::spawn(run_reset_loop(
            Arc::new(gateway.clone()),
            Duration::from_millis(200),
            rx,
        ));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(
            gateway.status_of("http://localhost/feed").await,
            Some(EndpointStatus::Ready)
        );

        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("reset loop did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_workers_rejected_at_assembly() {
        let mut config = AppConfig::default();
        config.scheduler.workers = vec!["w".to_string(), "w".to_string()];
        assert!(Application::new(config).is_err());
    }
}
