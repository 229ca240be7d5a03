pub mod analysis;
pub mod chat;
pub mod openai;
pub mod search;
pub mod store;
pub mod transcript;
pub mod youtube;
