//! Builds Wake-on-LAN magic packets and broadcasts them over UDP.
//!
//! A magic packet is six `0xFF` bytes followed by the target hardware
//! address repeated sixteen times, optionally finished with a SecureOn
//! password. Machines with Wake-on-LAN enabled power up when the frame
//! reaches their interface.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};

mod types;

pub use types::{MacAddr, ParseMacError, ParsePasswordError, Password};

const MAGIC_PACKET_LEN: usize = 102;
const MAX_PASSWORD_LEN: usize = 6;

/// An assembled magic packet for a single target.
pub struct MagicPacket {
    buf: [u8; MAGIC_PACKET_LEN + MAX_PASSWORD_LEN],
    len: usize,
}

impl MagicPacket {
    /// Assembles the packet for `target`, appending `password` when given.
    pub fn new(target: MacAddr, password: Option<Password>) -> Self {
        let mut buf = [0xFF; MAGIC_PACKET_LEN + MAX_PASSWORD_LEN];
        let mac = target.octets();

        // 16 copies of the MAC from the 7th byte on, leaving the leading
        // 6 bytes as 0xFF.
        for i in 1..17 {
            let dst = i * 6;
            buf[dst..dst + 6].copy_from_slice(&mac);
        }

        let mut len = MAGIC_PACKET_LEN;
        if let Some(password) = password {
            let pw = password.as_bytes();
            buf[len..len + pw.len()].copy_from_slice(pw);
            len += pw.len();
        }

        Self { buf, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Sends the packet as a single datagram from `local` to `remote`.
    /// Without a local address the socket binds to the unspecified
    /// address of the remote's family and the OS picks the source.
    pub fn send(&self, local: Option<SocketAddr>, remote: SocketAddr) -> io::Result<()> {
        let local = local.unwrap_or_else(|| match remote {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        });

        let socket = UdpSocket::bind(local)?;
        socket.set_broadcast(true)?;
        socket.send_to(self.as_bytes(), remote)?;

        Ok(())
    }
}

/// Builds the magic packet for `target` and sends it once. The usual
/// `remote` is a broadcast address on UDP port 9.
pub fn wake(
    target: MacAddr,
    password: Option<Password>,
    local: Option<SocketAddr>,
    remote: SocketAddr,
) -> io::Result<()> {
    MagicPacket::new(target, password).send(local, remote)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn target() -> MacAddr {
        "aa:aa:aa:aa:aa:aa".parse().unwrap()
    }

    #[test]
    fn packet_layout() {
        let packet = MagicPacket::new(target(), None);
        let bytes = packet.as_bytes();

        assert_eq!(bytes.len(), 102);

        // starts with padding
        assert_eq!(&bytes[..6], &[255, 255, 255, 255, 255, 255]);

        // follows with the mac
        assert_eq!(&bytes[6..12], &[170, 170, 170, 170, 170, 170]);

        // ends with the mac
        assert_eq!(&bytes[102 - 6..], &[170, 170, 170, 170, 170, 170]);
    }

    #[test]
    fn packet_repeats_mac_sixteen_times() {
        let mac = "00:1a:2b:3c:4d:5e".parse::<MacAddr>().unwrap();
        let packet = MagicPacket::new(mac, None);
        let bytes = packet.as_bytes();

        for chunk in bytes[6..].chunks(6) {
            assert_eq!(chunk, &[0x00, 0x1A, 0x2B, 0x3C, 0x4D, 0x5E]);
        }
    }

    #[test]
    fn packet_carries_password_tail() {
        let password = "fedcba987654".parse::<Password>().unwrap();
        let packet = MagicPacket::new(target(), Some(password));
        let bytes = packet.as_bytes();

        assert_eq!(bytes.len(), 108);
        assert_eq!(&bytes[..102], MagicPacket::new(target(), None).as_bytes());
        assert_eq!(&bytes[102..], &[0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54]);
    }

    #[test]
    fn packet_carries_short_password_tail() {
        let password = Password::new(&[1, 2, 3, 4]).unwrap();
        let packet = MagicPacket::new(target(), Some(password));
        let bytes = packet.as_bytes();

        assert_eq!(bytes.len(), 106);
        assert_eq!(&bytes[102..], &[1, 2, 3, 4]);
    }

    #[test]
    fn wake_sends_one_datagram() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let remote = receiver.local_addr().unwrap();

        wake(target(), None, None, remote).unwrap();

        let mut buf = [0u8; 128];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], MagicPacket::new(target(), None).as_bytes());
    }
}
