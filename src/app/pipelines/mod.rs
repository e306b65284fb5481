pub mod single_header_pipeline;
