use std::net::SocketAddr;

use async_trait::async_trait;
use common::bulb::Payload;
use log::{info, debug};
use serde_json::json;

use super::{ Bulbs, BulbError, Reply };
use crate::config::general::General;

/// Pretends to be the configured bulbs, nothing leaves the machine.
pub struct Dummy {
    targets: Vec<SocketAddr>,
}

impl Dummy {
    pub fn new(general: &General) -> Self {
        info!("new dummy created.");
        Dummy { targets: super::targets(general) }
    }
}

#[async_trait]
impl Bulbs for Dummy {
    async fn send(&mut self, payload: &Payload) -> Result<Vec<Reply>, BulbError> {
        let bytes = payload.to_bytes().map_err(BulbError::Encode)?;
        debug!("dummy received {}", String::from_utf8_lossy(&bytes));

        Ok(self.targets.iter()
            .map(|bulb| Reply {
                bulb: *bulb,
                body: json!({ "method": payload.method, "env": payload.env, "result": { "success": true } }),
            })
            .collect())
    }
}
