//! Minecraft server-list-ping client
//!
//! Speaks just enough of the status protocol to read the player count and
//! roster sample: handshake (next state = status), status request, one JSON
//! status response. Packets are length-prefixed with VarInts.

use craftstats_core::constants::NETWORK_TIMEOUT_SECS;
use craftstats_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Protocol version sent in the handshake; -1 means "status only"
const STATUS_PROTOCOL_VERSION: i32 = -1;

/// Guard against absurd packet lengths from a confused endpoint
const MAX_PACKET_LEN: i32 = 1024 * 1024;

/// Result of one status ping
#[derive(Debug, Clone, PartialEq)]
pub struct PingStatus {
    pub players_online: u32,
    pub players_max: u32,
    /// Roster sample reported by the server; may be empty
    pub player_names: Vec<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    #[serde(default)]
    players: Players,
}

#[derive(Deserialize, Default)]
struct Players {
    #[serde(default)]
    online: u32,
    #[serde(default)]
    max: u32,
    #[serde(default)]
    sample: Vec<PlayerEntry>,
}

#[derive(Deserialize)]
struct PlayerEntry {
    name: String,
}

/// Ping `host:port` and return the reported player status
pub async fn ping(host: &str, port: u16) -> Result<PingStatus> {
    let timeout = Duration::from_secs(NETWORK_TIMEOUT_SECS);
    match tokio::time::timeout(timeout, ping_inner(host, port)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Ping(format!(
            "{}:{} timed out after {}s",
            host, port, NETWORK_TIMEOUT_SECS
        ))),
    }
}

async fn ping_inner(host: &str, port: u16) -> Result<PingStatus> {
    let mut stream = TcpStream::connect((host, port))
        .await
        .map_err(|e| Error::Ping(format!("{}:{}: {}", host, port, e)))?;

    stream
        .write_all(&handshake_packet(host, port))
        .await
        .map_err(|e| Error::Ping(e.to_string()))?;
    stream
        .write_all(&status_request_packet())
        .await
        .map_err(|e| Error::Ping(e.to_string()))?;

    let json = read_status_response(&mut stream).await?;
    debug!("Status response from {}:{}: {} bytes", host, port, json.len());

    let status: StatusResponse =
        serde_json::from_str(&json).map_err(|e| Error::Ping(format!("bad status JSON: {}", e)))?;
    Ok(status_from_response(status))
}

fn status_from_response(response: StatusResponse) -> PingStatus {
    PingStatus {
        players_online: response.players.online,
        players_max: response.players.max,
        player_names: response
            .players
            .sample
            .into_iter()
            .map(|p| p.name)
            .collect(),
    }
}

/// Handshake packet: id 0x00, protocol version, address, port, next state 1
fn handshake_packet(host: &str, port: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    write_varint(&mut payload, 0x00);
    write_varint(&mut payload, STATUS_PROTOCOL_VERSION);
    write_varint(&mut payload, host.len() as i32);
    payload.extend_from_slice(host.as_bytes());
    payload.extend_from_slice(&port.to_be_bytes());
    write_varint(&mut payload, 0x01);
    frame(payload)
}

/// Status request packet: bare id 0x00
fn status_request_packet() -> Vec<u8> {
    let mut payload = Vec::new();
    write_varint(&mut payload, 0x00);
    frame(payload)
}

fn frame(payload: Vec<u8>) -> Vec<u8> {
    let mut packet = Vec::with_capacity(payload.len() + 5);
    write_varint(&mut packet, payload.len() as i32);
    packet.extend_from_slice(&payload);
    packet
}

async fn read_status_response(stream: &mut TcpStream) -> Result<String> {
    let _packet_len = read_varint(stream).await?;
    let packet_id = read_varint(stream).await?;
    if packet_id != 0x00 {
        return Err(Error::Ping(format!("unexpected packet id {}", packet_id)));
    }

    let json_len = read_varint(stream).await?;
    if !(0..=MAX_PACKET_LEN).contains(&json_len) {
        return Err(Error::Ping(format!("unreasonable status length {}", json_len)));
    }

    let mut buf = vec![0u8; json_len as usize];
    stream
        .read_exact(&mut buf)
        .await
        .map_err(|e| Error::Ping(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| Error::Ping(format!("status not UTF-8: {}", e)))
}

fn write_varint(buf: &mut Vec<u8>, value: i32) {
    let mut value = value as u32;
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

async fn read_varint(stream: &mut TcpStream) -> Result<i32> {
    let mut value: u32 = 0;
    for shift in 0..5 {
        let byte = stream
            .read_u8()
            .await
            .map_err(|e| Error::Ping(e.to_string()))?;
        value |= ((byte & 0x7f) as u32) << (shift * 7);
        if byte & 0x80 == 0 {
            return Ok(value as i32);
        }
    }
    Err(Error::Ping("VarInt too long".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: i32) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varint(&mut buf, value);
        buf
    }

    #[test]
    fn test_varint_encoding() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7f]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xac, 0x02]);
        assert_eq!(encode(25565), vec![0xdd, 0xc7, 0x01]);
        // -1 uses the full five bytes
        assert_eq!(encode(-1), vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn test_handshake_packet_shape() {
        let packet = handshake_packet("127.0.0.1", 25565);
        // First byte is the payload length (single-byte VarInt here)
        assert_eq!(packet[0] as usize, packet.len() - 1);
        // Packet id follows the length prefix
        assert_eq!(packet[1], 0x00);
    }

    #[test]
    fn test_status_request_packet() {
        assert_eq!(status_request_packet(), vec![0x01, 0x00]);
    }

    #[test]
    fn test_status_json_parsing() {
        let json = r#"{
            "version": {"name": "1.20.4", "protocol": 765},
            "players": {"max": 20, "online": 2, "sample": [
                {"name": "alex", "id": "00000000-0000-0000-0000-000000000001"},
                {"name": "steve", "id": "00000000-0000-0000-0000-000000000002"}
            ]},
            "description": {"text": "A Minecraft Server"}
        }"#;
        let response: StatusResponse = serde_json::from_str(json).unwrap();
        let status = status_from_response(response);

        assert_eq!(status.players_online, 2);
        assert_eq!(status.players_max, 20);
        assert_eq!(status.player_names, vec!["alex", "steve"]);
    }

    #[test]
    fn test_status_json_without_sample() {
        let json = r#"{"players": {"max": 20, "online": 0}}"#;
        let response: StatusResponse = serde_json::from_str(json).unwrap();
        let status = status_from_response(response);

        assert_eq!(status.players_online, 0);
        assert!(status.player_names.is_empty());
    }
}
