//! # hearthmode-adapter-presence-net
//!
//! Is the occupant's phone on the local network?
//!
//! ## Methods
//!
//! | Method | Check |
//! |--------|-------|
//! | `ping` | one ICMP echo through the system `ping` binary |
//! | `arp` | complete entry in the kernel neighbour table |
//! | `ping_then_arp` | ping, and consult the neighbour table when ping says no |
//!
//! Probe errors are returned as [`ProbeError`]; the presence monitor counts
//! them as "absent".
//!
//! ## Dependency rule
//!
//! Depends on `hearthmode-app` (port traits) only.

pub mod arp;

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use hearthmode_app::ports::{PresenceProbe, ProbeError};
use serde::{Deserialize, Serialize};

/// How reachability is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMethod {
    Ping,
    Arp,
    #[default]
    PingThenArp,
}

/// Default wait for one echo reply.
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Presence probe for one network host.
#[derive(Debug, Clone)]
pub struct NetworkProbe {
    target: String,
    mac: Option<String>,
    method: ProbeMethod,
    ping_timeout: Duration,
    ping_program: String,
    arp_table: PathBuf,
}

impl NetworkProbe {
    pub fn new(target: impl Into<String>, method: ProbeMethod) -> Self {
        Self {
            target: target.into(),
            mac: None,
            method,
            ping_timeout: DEFAULT_PING_TIMEOUT,
            ping_program: "ping".to_string(),
            arp_table: PathBuf::from(arp::PROC_NET_ARP),
        }
    }

    /// Also accept a neighbour entry carrying this hardware address.
    #[must_use]
    pub fn with_mac(mut self, mac: Option<String>) -> Self {
        self.mac = mac;
        self
    }

    #[must_use]
    pub fn with_ping_timeout(mut self, timeout: Duration) -> Self {
        self.ping_timeout = timeout;
        self
    }

    /// Use another ping executable (busybox, a wrapper script).
    #[must_use]
    pub fn with_ping_program(mut self, program: impl Into<String>) -> Self {
        self.ping_program = program.into();
        self
    }

    /// Read the neighbour table from another file.
    #[must_use]
    pub fn with_arp_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.arp_table = path.into();
        self
    }

    async fn ping(&self) -> Result<bool, ProbeError> {
        let wait_secs = self.ping_timeout.as_secs().max(1).to_string();
        let mut command = tokio::process::Command::new(&self.ping_program);
        command
            .args(["-c", "1", "-W", &wait_secs, &self.target])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let deadline = self.ping_timeout + Duration::from_secs(1);
        let status = tokio::time::timeout(deadline, command.status())
            .await
            .map_err(|_elapsed| ProbeError::Timeout)?
            .map_err(ProbeError::Spawn)?;
        Ok(status.success())
    }

    async fn arp(&self) -> Result<bool, ProbeError> {
        arp::lookup(&self.arp_table, &self.target, self.mac.as_deref()).await
    }
}

impl PresenceProbe for NetworkProbe {
    async fn probe(&self) -> Result<bool, ProbeError> {
        let present = match self.method {
            ProbeMethod::Ping => self.ping().await?,
            ProbeMethod::Arp => self.arp().await?,
            ProbeMethod::PingThenArp => match self.ping().await {
                Ok(true) => true,
                Ok(false) => self.arp().await?,
                Err(error) => {
                    tracing::debug!(%error, "ping unavailable, falling back to neighbour table");
                    self.arp().await?
                }
            },
        };
        tracing::debug!(host = %self.target, method = ?self.method, present, "presence probe");
        Ok(present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn arp_table(entry_ip: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "IP address       HW type     Flags       HW address            Mask     Device"
        )
        .unwrap();
        writeln!(
            file,
            "{entry_ip}     0x1         0x2         aa:bb:cc:dd:ee:ff     *        wlan0"
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn should_report_present_when_ping_succeeds() {
        let probe = NetworkProbe::new("192.168.1.23", ProbeMethod::Ping).with_ping_program("true");
        assert!(probe.probe().await.unwrap());
    }

    #[tokio::test]
    async fn should_report_absent_when_ping_fails() {
        let probe = NetworkProbe::new("192.168.1.23", ProbeMethod::Ping).with_ping_program("false");
        assert!(!probe.probe().await.unwrap());
    }

    #[tokio::test]
    async fn should_surface_missing_ping_binary() {
        let probe = NetworkProbe::new("192.168.1.23", ProbeMethod::Ping)
            .with_ping_program("/nonexistent/hearthmode-ping");
        assert!(matches!(probe.probe().await, Err(ProbeError::Spawn(_))));
    }

    #[tokio::test]
    async fn should_fall_back_to_neighbour_table() {
        let table = arp_table("192.168.1.23");
        let probe = NetworkProbe::new("192.168.1.23", ProbeMethod::PingThenArp)
            .with_ping_program("false")
            .with_arp_table(table.path());
        assert!(probe.probe().await.unwrap());
    }

    #[tokio::test]
    async fn should_fall_back_when_ping_cannot_run() {
        let table = arp_table("192.168.1.50");
        let probe = NetworkProbe::new("192.168.1.23", ProbeMethod::PingThenArp)
            .with_ping_program("/nonexistent/hearthmode-ping")
            .with_arp_table(table.path());
        assert!(!probe.probe().await.unwrap());
    }

    #[tokio::test]
    async fn should_match_by_mac_when_ip_changed() {
        let table = arp_table("192.168.1.50");
        let probe = NetworkProbe::new("192.168.1.23", ProbeMethod::Arp)
            .with_mac(Some("AA:BB:CC:DD:EE:FF".to_string()))
            .with_arp_table(table.path());
        assert!(probe.probe().await.unwrap());
    }

    #[tokio::test]
    async fn should_report_unreadable_neighbour_table() {
        let probe = NetworkProbe::new("192.168.1.23", ProbeMethod::Arp)
            .with_arp_table("/nonexistent/arp");
        assert!(matches!(
            probe.probe().await,
            Err(ProbeError::NeighbourTable(_))
        ));
    }
}
