pub mod pod;
pub mod replication_controller;
pub mod service;
