//! Note-taking backend: a generic entity repository over Postgres plus a
//! small REST surface.

pub mod dto;
pub mod entity;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
