pub mod catalog;
pub mod chat_responder;
pub mod exercise;
pub mod fallback_content;
pub mod llm_provider;
pub mod user_store;
pub mod word_content;
