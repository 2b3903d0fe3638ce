pub mod audit;
pub mod banner;
pub mod chat;
pub mod config;
pub mod consts;
pub mod engine;
pub mod metadata;
pub mod translator;
