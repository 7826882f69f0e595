pub mod config;
pub mod logger;
pub mod server;
pub mod post;
pub mod post_source;
pub mod post_collection;
pub mod like_store;
pub mod movies;
pub mod text_utils;
#[cfg(test)]
mod test_data;
mod content_cache;
mod post_processor;
mod query_string;
mod paginator;
mod view;
