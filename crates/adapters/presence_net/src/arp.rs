//! Kernel neighbour table lookup (`/proc/net/arp`).
//!
//! Phones that ignore ICMP while their screen is off still answer ARP, so a
//! complete neighbour entry is taken as evidence of presence.

use std::path::Path;

use hearthmode_app::ports::ProbeError;

/// Linux neighbour table.
pub const PROC_NET_ARP: &str = "/proc/net/arp";

const INCOMPLETE_FLAGS: &str = "0x0";
const EMPTY_MAC: &str = "00:00:00:00:00:00";

/// Whether the table lists a complete entry for `ip` or `mac`.
pub(crate) async fn lookup(path: &Path, ip: &str, mac: Option<&str>) -> Result<bool, ProbeError> {
    let table = tokio::fs::read_to_string(path)
        .await
        .map_err(ProbeError::NeighbourTable)?;
    Ok(contains(&table, ip, mac))
}

fn contains(table: &str, ip: &str, mac: Option<&str>) -> bool {
    table.lines().skip(1).any(|line| {
        let columns: Vec<&str> = line.split_whitespace().collect();
        let [address, _hw_type, flags, hw_address, ..] = columns.as_slice() else {
            return false;
        };
        let matches = *address == ip || mac.is_some_and(|mac| hw_address.eq_ignore_ascii_case(mac));
        matches && *flags != INCOMPLETE_FLAGS && *hw_address != EMPTY_MAC
    })
}
