pub mod card_pipeline;
