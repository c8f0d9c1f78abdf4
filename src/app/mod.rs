// Application layer: concrete pipelines wired from the core components.

pub mod pipelines;
