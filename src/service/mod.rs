//service/mod.rs
pub mod task_service;
