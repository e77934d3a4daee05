//! Tip fetcher runtime.
//!
//! Bridges the sync game loop with async tip sources. Requests are
//! fire-and-forget: each one runs as its own task with a timeout, and exactly
//! one [`TipReply`] comes back per request, carrying either the fetched text
//! or the configured fallback.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;

use sumblocks_types::{TipReply, TipRequest};

use crate::config::{TipConfig, TipProvider};
use crate::error::TipError;
use crate::http::HttpTipSource;
use crate::source::{CannedTipSource, TipSource};

/// Running tip fetcher.
pub struct TipFetcher {
    rt: Option<Runtime>,
    source: Arc<dyn TipSource>,
    timeout: Duration,
    fallback: Arc<str>,
    reply_tx: mpsc::UnboundedSender<TipReply>,
    reply_rx: mpsc::UnboundedReceiver<TipReply>,
}

impl TipFetcher {
    /// Start a fetcher for `config`.
    ///
    /// Returns `Ok(None)` when tips are disabled.
    pub fn start(config: &TipConfig) -> anyhow::Result<Option<Self>> {
        if !config.enabled {
            log::info!("tips disabled");
            return Ok(None);
        }

        let rt = build_runtime()?;
        let source: Arc<dyn TipSource> = match config.provider {
            TipProvider::Http => {
                // The hyper client wants a runtime context at construction.
                let _guard = rt.enter();
                let source = HttpTipSource::new(config)
                    .with_context(|| format!("bad tip endpoint {:?}", config.endpoint))?;
                Arc::new(source)
            }
            TipProvider::Offline => Arc::new(CannedTipSource),
        };
        log::info!(
            "tip fetcher started: source={} timeout={}ms",
            source.name(),
            config.timeout_ms
        );
        Ok(Some(Self::from_parts(rt, source, config)))
    }

    /// Start a fetcher around an explicit source.
    pub fn with_source(source: Arc<dyn TipSource>, config: &TipConfig) -> anyhow::Result<Self> {
        let rt = build_runtime()?;
        Ok(Self::from_parts(rt, source, config))
    }

    fn from_parts(rt: Runtime, source: Arc<dyn TipSource>, config: &TipConfig) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            rt: Some(rt),
            source,
            timeout: Duration::from_millis(config.timeout_ms.max(1)),
            fallback: Arc::from(config.fallback.as_str()),
            reply_tx,
            reply_rx,
        }
    }

    /// Fire off a tip fetch. The reply arrives later through [`try_recv`].
    ///
    /// [`try_recv`]: TipFetcher::try_recv
    pub fn request(&self, request: TipRequest) {
        let Some(rt) = self.rt.as_ref() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let fallback = Arc::clone(&self.fallback);
        let tx = self.reply_tx.clone();
        let timeout = self.timeout;

        log::debug!("tip request {} (score {})", request.id, request.score);
        rt.spawn(async move {
            let result = match tokio::time::timeout(timeout, source.fetch_tip(&request)).await {
                Ok(result) => result,
                Err(_) => Err(TipError::Timeout(timeout.as_millis() as u64)),
            };
            let text = match result {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("tip request {} failed, using fallback: {}", request.id, err);
                    fallback.to_string()
                }
            };
            let _ = tx.send(TipReply {
                request_id: request.id,
                text,
            });
        });
    }

    /// Next finished reply, if any. Never blocks.
    pub fn try_recv(&mut self) -> Option<TipReply> {
        self.reply_rx.try_recv().ok()
    }
}

impl Drop for TipFetcher {
    fn drop(&mut self) {
        // Don't hold up exit on a slow tip service.
        if let Some(rt) = self.rt.take() {
            rt.shutdown_background();
        }
    }
}

fn build_runtime() -> anyhow::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("sumblocks-tips")
        .enable_all()
        .build()
        .context("failed to create tip runtime")
}
