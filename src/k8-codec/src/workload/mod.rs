mod replication_controller;
mod service;

pub use replication_controller::decode_replication_controller;
pub use replication_controller::encode_replication_controller;
pub use service::decode_service;
pub use service::encode_service;
