use crate::core::cards::CardRenderer;
use crate::core::loader::load_records;
use crate::core::template::{fill, unresolved_placeholders, KEY_CARDS, KEY_GENERATED_AT, KEY_NAME};
use crate::domain::model::{Record, RenderedCards, Substitutions};
use crate::domain::ports::{Clock, ConfigProvider, Pipeline, Storage, SystemClock};
use crate::utils::error::{Result, SiteError};
use std::fmt::Write as _;

pub struct CardPipeline<S: Storage, C: ConfigProvider, K: Clock = SystemClock> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) renderer: CardRenderer,
    pub(crate) clock: K,
}

impl<S: Storage, C: ConfigProvider> CardPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_clock(storage, config, SystemClock)
    }
}

impl<S: Storage, C: ConfigProvider, K: Clock> CardPipeline<S, C, K> {
    pub fn with_clock(storage: S, config: C, clock: K) -> Self {
        Self {
            storage,
            config,
            renderer: CardRenderer::default(),
            clock,
        }
    }

    pub fn with_renderer(mut self, renderer: CardRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.storage.read_file(path).await?;
        Ok(String::from_utf8(bytes)?)
    }

    fn generated_at(&self) -> Result<String> {
        let format = self.config.timestamp_format();
        let mut stamp = String::new();
        // 無效的 strftime 會讓 Display 失敗，轉成設定錯誤而不是 panic
        write!(stamp, "{}", self.clock.now().format(format)).map_err(|_| {
            SiteError::InvalidConfigValueError {
                field: "timestamp_format".to_string(),
                value: format.to_string(),
                reason: "Invalid strftime format".to_string(),
            }
        })?;
        Ok(stamp)
    }

    fn substitutions(&self, cards_html: String) -> Result<Substitutions> {
        Ok(Substitutions::new()
            .with(KEY_NAME, self.config.subject_name())
            .with(KEY_CARDS, cards_html)
            .with(KEY_GENERATED_AT, self.generated_at()?))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, K: Clock> Pipeline for CardPipeline<S, C, K> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading records from: {}", self.config.input_path());
        let content = self.read_text(self.config.input_path()).await?;

        let records = load_records(&content, self.config.header_prefix())?;
        if records.is_empty() {
            tracing::warn!("⚠️ Header found but no data rows follow it");
        }
        Ok(records)
    }

    async fn transform(&self, records: Vec<Record>) -> Result<RenderedCards> {
        let cards_html = self.renderer.render_all(&records);
        tracing::debug!(
            "Rendered {} cards into {} bytes of markup",
            records.len(),
            cards_html.len()
        );

        Ok(RenderedCards {
            card_count: records.len(),
            cards_html,
            records,
        })
    }

    async fn load(&self, cards: RenderedCards) -> Result<String> {
        tracing::debug!("Reading template from: {}", self.config.template_path());
        let template = self.read_text(self.config.template_path()).await?;

        let mapping = self.substitutions(cards.cards_html)?;
        for (key, value) in mapping.iter() {
            tracing::debug!("Substitution {{{{{}}}}}: {} bytes", key, value.len());
        }
        let page = fill(&template, &mapping);

        let leftover = unresolved_placeholders(&page);
        if !leftover.is_empty() {
            tracing::warn!("⚠️ Template placeholders left unfilled: {}", leftover.join(", "));
        }

        // 頁面最後寫出：記錄檔失敗時不留下頁面
        if let Some(path) = self.config.records_json_path() {
            let json = serde_json::to_string_pretty(&cards.records)?;
            tracing::debug!("Writing records dump to {}", path);
            self.storage.write_file(path, json.as_bytes()).await?;
        }

        let output_path = self.config.output_path();
        tracing::debug!("Writing {} bytes to {}", page.len(), output_path);
        self.storage.write_file(output_path, page.as_bytes()).await?;

        Ok(output_path.to_string())
    }
}
