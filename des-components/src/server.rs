//! Single server with an exponential service-time parameter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the server is currently serving a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServerStatus {
    #[default]
    Idle,
    Busy,
}

impl ServerStatus {
    /// 1 when busy, 0 when idle, as used by the trace and the busy integral
    pub fn as_indicator(self) -> u8 {
        match self {
            ServerStatus::Idle => 0,
            ServerStatus::Busy => 1,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerStatus::Idle => write!(f, "idle"),
            ServerStatus::Busy => write!(f, "busy"),
        }
    }
}

/// One server: its status and its mean service time in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Server {
    status: ServerStatus,
    mean_service_time: f64,
}

impl Server {
    /// Create an idle server
    ///
    /// # Arguments
    /// * `mean_service_time` - Mean of the exponential service time, in minutes
    pub fn new(mean_service_time: f64) -> Self {
        Self {
            status: ServerStatus::Idle,
            mean_service_time,
        }
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status == ServerStatus::Busy
    }

    pub fn mean_service_time(&self) -> f64 {
        self.mean_service_time
    }

    /// Mark the server busy with a new customer
    pub fn start_service(&mut self) {
        debug_assert!(!self.is_busy(), "service started on a busy server");
        self.status = ServerStatus::Busy;
    }

    /// Mark the server idle after its last customer left
    pub fn release(&mut self) {
        self.status = ServerStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_status_transitions() {
        let mut server = Server::new(0.5);
        assert_eq!(server.status(), ServerStatus::Idle);
        assert_eq!(server.mean_service_time(), 0.5);

        server.start_service();
        assert!(server.is_busy());
        assert_eq!(server.status().as_indicator(), 1);

        server.release();
        assert!(!server.is_busy());
        assert_eq!(server.status().as_indicator(), 0);
        assert_eq!(server.status().to_string(), "idle");
    }
}
