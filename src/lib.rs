//! ytsum - YouTube subtitle summarizer
//!
//! Downloads a video's English subtitle track with yt-dlp, strips the
//! SRT structure down to narrative text, and pipes the text to a local
//! ollama model for summarization.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod preflight;
pub mod release;
pub mod summarize;
pub mod tool;
pub mod transcript;
pub mod workflow;
