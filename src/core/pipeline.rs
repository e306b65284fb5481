pub use crate::app::pipelines::single_header_pipeline::SingleHeaderPipeline;
