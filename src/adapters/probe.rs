use crate::core::PortProbe;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpSocket;

/// 以「綁定後立即釋放」的方式檢查埠號
///
/// 結果只代表檢查當下的狀態，檢查與實際使用之間仍可能被其他程序搶走。
#[derive(Debug, Clone, Copy)]
pub struct TcpBindProbe {
    host: IpAddr,
}

impl TcpBindProbe {
    pub fn new(host: IpAddr) -> Self {
        Self { host }
    }

    pub fn localhost() -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

impl Default for TcpBindProbe {
    fn default() -> Self {
        Self::localhost()
    }
}

impl PortProbe for TcpBindProbe {
    fn is_free(&self, port: u16) -> bool {
        // 綁定 0 會拿到系統隨機分配的埠號，不代表指定的埠號可用
        if port == 0 {
            return false;
        }

        let addr = SocketAddr::new(self.host, port);
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        };
        let socket = match socket {
            Ok(socket) => socket,
            Err(e) => {
                tracing::debug!("Could not create probe socket for {}: {}", addr, e);
                return false;
            }
        };

        if let Err(e) = socket.set_reuseaddr(true) {
            tracing::debug!("Could not set SO_REUSEADDR for {}: {}", addr, e);
            return false;
        }

        match socket.bind(addr) {
            Ok(()) => true,
            Err(e) => {
                tracing::trace!("Port {} unavailable: {}", port, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_listening_port_is_not_free() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(!TcpBindProbe::localhost().is_free(port));
    }

    #[test]
    fn test_released_port_is_free_again() {
        let port = {
            let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
            listener.local_addr().unwrap().port()
        };

        assert!(TcpBindProbe::localhost().is_free(port));
    }

    #[test]
    fn test_probe_releases_the_port() {
        let port = {
            let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
            listener.local_addr().unwrap().port()
        };

        let probe = TcpBindProbe::default();
        assert!(probe.is_free(port));
        assert!(TcpListener::bind(("127.0.0.1", port)).is_ok());
    }

    #[test]
    fn test_port_zero_is_never_free() {
        assert!(!TcpBindProbe::localhost().is_free(0));
    }
}
