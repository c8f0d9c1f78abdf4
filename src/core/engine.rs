use crate::core::Pipeline;
use crate::domain::model::RenderedCards;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct CardEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 執行完整流程，回傳輸出檔路徑
    pub async fn run(&self) -> Result<String> {
        let cards = self.render().await?;

        // Load
        tracing::info!("📝 Filling template and writing output...");
        let output_path = self.pipeline.load(cards).await?;
        self.monitor.log_phase("load");
        self.monitor.log_final();

        Ok(output_path)
    }

    /// 只跑 extract 與 transform，不寫任何檔案
    pub async fn dry_run(&self) -> Result<RenderedCards> {
        let cards = self.render().await?;
        tracing::info!(
            "🔍 Dry run: {} card(s) rendered ({} bytes), nothing written",
            cards.card_count,
            cards.cards_html.len()
        );
        self.monitor.log_final();
        Ok(cards)
    }

    async fn render(&self) -> Result<RenderedCards> {
        // Extract
        tracing::info!("📥 Loading records...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Loaded {} records", records.len());
        self.monitor.log_phase("extract");

        // Transform
        tracing::info!("🎨 Rendering cards...");
        let cards = self.pipeline.transform(records).await?;
        tracing::info!("Rendered {} cards", cards.card_count);
        self.monitor.log_phase("transform");

        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Record;
    use crate::utils::error::SiteError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubPipeline {
        fail_extract: bool,
        loaded: AtomicBool,
    }

    impl StubPipeline {
        fn new(fail_extract: bool) -> Self {
            Self {
                fail_extract,
                loaded: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<Record>> {
            if self.fail_extract {
                return Err(SiteError::HeaderNotFound {
                    prefix: "Name,".to_string(),
                });
            }
            Ok(vec![Record::default(), Record::default()])
        }

        async fn transform(&self, records: Vec<Record>) -> Result<RenderedCards> {
            Ok(RenderedCards {
                card_count: records.len(),
                cards_html: "<article></article>".to_string(),
                records,
            })
        }

        async fn load(&self, _cards: RenderedCards) -> Result<String> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok("out/cards.html".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_executes_all_phases() {
        let engine = CardEngine::new(StubPipeline::new(false));
        let output = engine.run().await.unwrap();

        assert_eq!(output, "out/cards.html");
        assert!(engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_extract_failure_skips_load() {
        let engine = CardEngine::new(StubPipeline::new(true));
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, SiteError::HeaderNotFound { .. }));
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dry_run_never_loads() {
        let engine = CardEngine::new(StubPipeline::new(false));
        let cards = engine.dry_run().await.unwrap();

        assert_eq!(cards.card_count, 2);
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }
}
