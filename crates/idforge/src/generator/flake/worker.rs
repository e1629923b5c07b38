use core::fmt;
use std::net::IpAddr;

use crate::error::{Error, Result};

/// The 48-bit identity a [`FlakeGenerator`] embeds in every identifier.
///
/// Distinct worker ids keep generators on different hosts (sharing an epoch)
/// from colliding. Values wider than 48 bits are silently truncated to their
/// low 48 bits: `WorkerId::new(0x1234_0000_0000_0001)` is the same worker as
/// `WorkerId::new(1)`.
///
/// [`FlakeGenerator`]: crate::generator::FlakeGenerator
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct WorkerId(u64);

impl WorkerId {
    pub const BITS: u32 = 48;
    pub const MAX: u64 = (1 << Self::BITS) - 1;

    /// Creates a worker id from the low 48 bits of `raw`.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw & Self::MAX)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the six worker id bytes, most significant first.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }

    /// Derives a worker id from candidate host addresses.
    ///
    /// Loopback and IPv6 addresses are ignored. Each remaining IPv4 address is
    /// read as a 32-bit big-endian integer, reduced modulo 2^48, and the
    /// largest value wins. This is a best-effort heuristic for telling hosts
    /// apart, not a uniqueness guarantee.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoWorkerAddress`] if no candidate remains.
    ///
    /// # Example
    /// ```
    /// use std::net::{IpAddr, Ipv4Addr};
    /// use idforge::WorkerId;
    ///
    /// let addrs = [
    ///     IpAddr::V4(Ipv4Addr::LOCALHOST),
    ///     IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)),
    ///     IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
    /// ];
    /// let worker = WorkerId::from_addrs(addrs).unwrap();
    /// assert_eq!(worker.get(), 0xC0A8_0114);
    /// ```
    pub fn from_addrs<I>(addrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        addrs
            .into_iter()
            .filter_map(|addr| match addr {
                IpAddr::V4(v4) if !v4.is_loopback() => Some(u64::from(u32::from(v4)) & Self::MAX),
                _ => None,
            })
            .max()
            .map(Self::new)
            .ok_or(Error::NoWorkerAddress)
    }

    /// Derives a worker id from the host's network interfaces.
    ///
    /// See [`WorkerId::from_addrs`] for the selection rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AddressLookup`] if the interfaces cannot be
    /// enumerated, or [`Error::NoWorkerAddress`] if none carries a usable
    /// IPv4 address.
    pub fn detect() -> Result<Self> {
        let interfaces =
            if_addrs::get_if_addrs().map_err(|e| Error::AddressLookup(e.to_string()))?;
        let worker = Self::from_addrs(
            interfaces
                .iter()
                .filter(|iface| !iface.is_loopback())
                .map(if_addrs::Interface::ip),
        );

        #[cfg(feature = "tracing")]
        match &worker {
            Ok(id) => tracing::debug!(worker_id = %id, "derived worker id from host addresses"),
            Err(e) => tracing::warn!(error = %e, "unable to derive worker id"),
        }

        worker
    }
}

impl From<u64> for WorkerId {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:012x}", self.0)
    }
}

impl fmt::Debug for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkerId(0x{:012x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn truncates_to_low_48_bits() {
        assert_eq!(WorkerId::new(u64::MAX).get(), 0xFFFF_FFFF_FFFF);
        assert_eq!(WorkerId::new(0x1234_0000_0000_0001), WorkerId::new(1));
        assert_eq!(WorkerId::new(0x0000_ABCD_EF01_2345).get(), 0xABCD_EF01_2345);
    }

    #[test]
    fn bytes_are_most_significant_first() {
        let worker = WorkerId::new(0x0102_0304_0506);
        assert_eq!(worker.to_bytes(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(worker.to_string(), "010203040506");
    }

    #[test]
    fn picks_largest_non_loopback_ipv4() {
        let addrs = [
            IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)),
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)),
            IpAddr::V4(Ipv4Addr::new(172, 16, 0, 9)),
        ];
        let worker = WorkerId::from_addrs(addrs).unwrap();
        assert_eq!(worker.get(), u64::from(u32::from(Ipv4Addr::new(172, 16, 0, 9))));
    }

    #[test]
    fn loopback_only_is_an_error() {
        let addrs = [
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(127, 8, 8, 8)),
            IpAddr::V6(Ipv6Addr::LOCALHOST),
        ];
        assert_eq!(WorkerId::from_addrs(addrs), Err(Error::NoWorkerAddress));
        assert_eq!(WorkerId::from_addrs([]), Err(Error::NoWorkerAddress));
    }

    #[test]
    fn detect_scans_host_interfaces() {
        match WorkerId::detect() {
            Ok(worker) => assert!(worker.get() <= WorkerId::MAX),
            Err(e) => assert!(
                matches!(e, Error::NoWorkerAddress | Error::AddressLookup(_)),
                "unexpected error: {e}"
            ),
        }
    }
}
