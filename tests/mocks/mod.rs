#![allow(dead_code)]

pub mod http_server;
pub mod language_model;
pub mod page_source;
pub mod transcript_source;
