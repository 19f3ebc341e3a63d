use std::net::{ Ipv4Addr, SocketAddr };
use std::time::Duration;

use async_trait::async_trait;
use common::bulb::Payload;
use log::{ debug, warn };
use tokio::net::UdpSocket;
use tokio::time::{ timeout_at, Instant };

use super::{ Bulbs, BulbError, Reply };
use crate::config::general::General;

const REPLY_BUFFER: usize = 8192;

/// Talks to the bulbs with one JSON datagram each, waiting for every reply in turn.
pub struct Udp {
    local: SocketAddr,
    targets: Vec<SocketAddr>,
    reply_timeout: Duration,
}

impl Udp {
    pub fn new(general: &General) -> Self {
        Udp {
            local: SocketAddr::from((Ipv4Addr::UNSPECIFIED, general.socket_port)),
            targets: super::targets(general),
            reply_timeout: general.reply_timeout,
        }
    }
}

#[async_trait]
impl Bulbs for Udp {
    async fn send(&mut self, payload: &Payload) -> Result<Vec<Reply>, BulbError> {
        let bytes = payload.to_bytes().map_err(BulbError::Encode)?;
        let socket = UdpSocket::bind(self.local).await.map_err(BulbError::IO)?;
        debug!("sending {} to {:?}", String::from_utf8_lossy(&bytes), self.targets);

        let mut replies = Vec::with_capacity(self.targets.len());
        let mut buf = vec![0u8; REPLY_BUFFER];
        for target in &self.targets {
            match exchange(&socket, &bytes, *target, &mut buf, self.reply_timeout).await {
                Ok(reply) => replies.push(reply),
                Err(e @ (BulbError::Timeout(..) | BulbError::Decode(..))) => warn!("bulb {target} skipped. {e}"),
                Err(e) => return Err(e),
            }
        }

        debug!("received replies {replies:?}");
        Ok(replies)
    }
}

async fn exchange(socket: &UdpSocket, bytes: &[u8], target: SocketAddr, buf: &mut [u8], reply_timeout: Duration) -> Result<Reply, BulbError> {
    socket.send_to(bytes, target).await.map_err(BulbError::IO)?;

    // datagrams from anyone but the target don't count as its reply
    let deadline = Instant::now() + reply_timeout;
    loop {
        let (len, from) = timeout_at(deadline, socket.recv_from(buf)).await
            .map_err(|_| BulbError::Timeout(target, reply_timeout))?
            .map_err(BulbError::IO)?;
        if from != target {
            debug!("ignoring {len} bytes from {from} while waiting for {target}");
            continue;
        }

        let body = serde_json::from_slice(&buf[..len]).map_err(|e| BulbError::Decode(from, e))?;
        return Ok(Reply { bulb: from, body });
    }
}
