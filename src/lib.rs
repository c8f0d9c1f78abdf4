pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    cards::CardRenderer, engine::CardEngine, loader::load_records, template::fill, CardPipeline,
};
pub use domain::model::{Record, RenderedCards, Substitutions};
pub use utils::error::{Result, SiteError};
