pub mod catalog;
pub mod indicators;
pub mod llm_service;
pub mod response_schema;
pub mod series_generator;
