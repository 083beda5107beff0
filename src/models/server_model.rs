use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MockServerConfig {
    pub connection: Connection,
    pub sample_count: usize,
    pub seed: u64,
    pub file_keys: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
}
