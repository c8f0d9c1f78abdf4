pub mod cards;
pub mod engine;
pub mod loader;
pub mod template;

pub use crate::app::pipelines::card_pipeline::CardPipeline;
pub use crate::domain::model::{Record, RenderedCards, Substitutions};
pub use crate::domain::ports::{Clock, ConfigProvider, Pipeline, Storage, SystemClock};
pub use crate::utils::error::Result;
