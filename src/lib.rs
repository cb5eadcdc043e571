//! Carelink - a patient client for a telehealth platform.
//!
//! This crate implements the non-visual core of the patient app: the
//! session lifecycle (login, remember-me, logout, 401 invalidation),
//! the favorites synchronizer, the doctor list, and the durable
//! key-value store all local state lives in. The terminal front-end in
//! `main.rs` is a thin driver over [`app::App`].

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod demo;
pub mod favorites;
pub mod models;
pub mod settings;
pub mod storage;
