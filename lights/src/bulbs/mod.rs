mod dummy;
mod udp;

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use common::bulb::Payload;
use thiserror::Error;

use dummy::Dummy;
use udp::Udp;
use crate::config::general::{ BulbModule, General };

/// Answer of one bulb to a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub bulb: SocketAddr,
    pub body: serde_json::Value,
}

#[derive(Error, Debug)]
pub enum BulbError {
    #[error("encoding payload failed. {0}")]
    Encode(serde_json::Error),

    #[error("IO Error. {0}")]
    IO(std::io::Error),

    #[error("no reply from {0} within {1:?}.")]
    Timeout(SocketAddr, Duration),

    #[error("reply from {0} is not json. {1}")]
    Decode(SocketAddr, serde_json::Error),
}

pub fn build(general: &General) -> Box<dyn Bulbs> {
    match general.module {
        BulbModule::Dummy => Box::new(Dummy::new(general)),
        BulbModule::Udp => Box::new(Udp::new(general)),
    }
}

pub(crate) fn targets(general: &General) -> Vec<SocketAddr> {
    general.bulb_ips.iter().map(|ip| SocketAddr::new(*ip, general.bulb_port)).collect()
}

#[async_trait]
pub trait Bulbs {
    /// Sends `payload` to every bulb, returns the replies of the bulbs that answered.
    async fn send(&mut self, payload: &Payload) -> Result<Vec<Reply>, BulbError>;
}
