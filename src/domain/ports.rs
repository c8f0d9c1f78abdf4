use crate::domain::model::{Record, RenderedCards};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn template_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn subject_name(&self) -> &str;
    fn header_prefix(&self) -> &str;
    fn timestamp_format(&self) -> &str;
    fn records_json_path(&self) -> Option<&str>;
}

/// Wall-clock source; only used to stamp `GENERATED_AT`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, records: Vec<Record>) -> Result<RenderedCards>;
    async fn load(&self, cards: RenderedCards) -> Result<String>;
}
