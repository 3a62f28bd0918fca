//! Node service endpoints.
//!
//! Address books distribute node locations as wire records. Two legacy
//! port values float around in old records: `0` (unset) and `50111` (a
//! retired alias). Both normalize to the canonical node port on decode
//! so the rest of the SDK never has to special-case them.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

/// Errors from decoding an endpoint record.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The record's address field is not 4 bytes of IPv4.
    #[error("endpoint address must be 4 bytes, got {got}")]
    InvalidAddress {
        /// Length of the address field that was received.
        got: usize,
    },

    /// The record's port does not fit a real port number.
    #[error("endpoint port {got} is out of range")]
    InvalidPort {
        /// The port value that was received.
        got: u32,
    },
}

/// The wire form of a node location, as found in address-book records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// IPv4 address, big-endian octets.
    pub ip_address_v4: Vec<u8>,
    /// Port, widened on the wire; `0` means unset.
    pub port: u32,
}

/// A resolved node network location: address and normalized port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    address: Ipv4Addr,
    port: u16,
}

impl Endpoint {
    /// An endpoint at an explicit address and port.
    pub const fn new(address: Ipv4Addr, port: u16) -> Self {
        Endpoint { address, port }
    }

    /// Decodes a wire record, normalizing the legacy port values.
    pub fn from_wire(record: &ServiceEndpoint) -> Result<Self, EndpointError> {
        let octets: [u8; 4] =
            record
                .ip_address_v4
                .as_slice()
                .try_into()
                .map_err(|_| EndpointError::InvalidAddress {
                    got: record.ip_address_v4.len(),
                })?;

        let port = if record.port == 0 || record.port == u32::from(config::LEGACY_NODE_PORT) {
            config::CANONICAL_NODE_PORT
        } else {
            u16::try_from(record.port).map_err(|_| EndpointError::InvalidPort { got: record.port })?
        };

        Ok(Endpoint {
            address: Ipv4Addr::from(octets),
            port,
        })
    }

    /// Encodes this endpoint as a wire record.
    pub fn to_wire(&self) -> ServiceEndpoint {
        ServiceEndpoint {
            ip_address_v4: self.address.octets().to_vec(),
            port: u32::from(self.port),
        }
    }

    /// The IPv4 address.
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// The (already normalized) port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
