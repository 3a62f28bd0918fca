//! Transaction identifiers.
//!
//! A transaction id is the pair (payer account, valid-start instant),
//! optionally extended with a nonce (for internal child transactions)
//! and a scheduled flag. The network deduplicates submissions by this
//! id, so it must be chosen before signing and never changed after.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::entity::AccountId;

/// Errors from parsing a transaction id string.
#[derive(Debug, Error)]
pub enum TransactionIdError {
    /// The text does not match `payer@seconds.nanos[?scheduled][/nonce]`.
    #[error("malformed transaction id: {text:?}")]
    Malformed {
        /// The offending input.
        text: String,
    },
}

/// Identifies one transaction: who pays, and from when it is valid.
///
/// # Examples
///
/// ```
/// use hgraph_sdk::entity::AccountId;
/// use hgraph_sdk::transaction::TransactionId;
/// use chrono::{TimeZone, Utc};
///
/// let valid_start = Utc.timestamp_opt(1_554_158_542, 0).unwrap();
/// let id = TransactionId::with_valid_start(AccountId::new(0, 0, 5006), valid_start);
/// assert_eq!(id.to_string(), "0.0.5006@1554158542.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    /// The account paying for the transaction.
    pub account_id: AccountId,
    /// The instant from which the transaction is valid. The validity
    /// window extends from here for the transaction's valid duration.
    pub valid_start: DateTime<Utc>,
    /// Nonce distinguishing child transactions spawned by the same
    /// parent. `None` for ordinary user transactions.
    pub nonce: Option<i32>,
    /// Whether this id refers to the scheduled copy of a transaction.
    pub scheduled: bool,
}

impl TransactionId {
    /// An id with an explicit valid-start instant.
    pub fn with_valid_start(account_id: AccountId, valid_start: DateTime<Utc>) -> Self {
        TransactionId {
            account_id,
            valid_start,
            nonce: None,
            scheduled: false,
        }
    }

    /// Generates an id valid from "now".
    ///
    /// The valid-start is backdated by a few seconds of random jitter:
    /// if the client clock runs slightly ahead of the network, an
    /// un-jittered id would be rejected as not yet valid. The jitter
    /// also makes two ids generated in the same instant distinct.
    pub fn generate(account_id: AccountId) -> Self {
        let jitter = rand::thread_rng()
            .gen_range(config::VALID_START_JITTER_MIN_MS..config::VALID_START_JITTER_MAX_MS);
        TransactionId {
            account_id,
            valid_start: Utc::now() - Duration::milliseconds(jitter),
            nonce: None,
            scheduled: false,
        }
    }

    /// A copy of this id marked as scheduled.
    pub fn scheduled(mut self) -> Self {
        self.scheduled = true;
        self
    }

    /// A copy of this id with the given nonce.
    pub fn with_nonce(mut self, nonce: i32) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}.{}",
            self.account_id,
            self.valid_start.timestamp(),
            self.valid_start.timestamp_subsec_nanos()
        )?;
        if self.scheduled {
            write!(f, "?scheduled")?;
        }
        if let Some(nonce) = self.nonce {
            write!(f, "/{}", nonce)?;
        }
        Ok(())
    }
}

impl FromStr for TransactionId {
    type Err = TransactionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TransactionIdError::Malformed {
            text: s.to_string(),
        };

        let (rest, nonce) = match s.split_once('/') {
            None => (s, None),
            Some((rest, nonce)) => (rest, Some(nonce.parse().map_err(|_| malformed())?)),
        };

        let (rest, scheduled) = match rest.strip_suffix("?scheduled") {
            None => (rest, false),
            Some(rest) => (rest, true),
        };

        let (account, instant) = rest.split_once('@').ok_or_else(malformed)?;
        let account_id: AccountId = account.parse().map_err(|_| malformed())?;

        let (seconds, nanos) = instant.split_once('.').ok_or_else(malformed)?;
        let seconds: i64 = seconds.parse().map_err(|_| malformed())?;
        let nanos: u32 = nanos.parse().map_err(|_| malformed())?;
        let valid_start = Utc
            .timestamp_opt(seconds, nanos)
            .single()
            .ok_or_else(malformed)?;

        Ok(TransactionId {
            account_id,
            valid_start,
            nonce,
            scheduled,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> TransactionId {
        TransactionId::with_valid_start(
            AccountId::new(0, 0, 5006),
            Utc.timestamp_opt(1_554_158_542, 0).unwrap(),
        )
    }

    #[test]
    fn display_form() {
        assert_eq!(fixture().to_string(), "0.0.5006@1554158542.0");
    }

    #[test]
    fn display_with_markers() {
        let id = fixture().scheduled().with_nonce(3);
        assert_eq!(id.to_string(), "0.0.5006@1554158542.0?scheduled/3");
    }

    #[test]
    fn parse_roundtrip() {
        for id in [
            fixture(),
            fixture().scheduled(),
            fixture().with_nonce(7),
            fixture().scheduled().with_nonce(7),
            TransactionId::with_valid_start(
                AccountId::new(0, 0, 2),
                Utc.timestamp_opt(1_554_158_542, 123_456_789).unwrap(),
            ),
        ] {
            let parsed: TransactionId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn rejects_malformed_text() {
        for text in [
            "",
            "0.0.5006",
            "@1554158542.0",
            "0.0.5006@",
            "0.0.5006@1554158542",
            "0.0.5006@15541.x",
            "x.y.z@1.2",
        ] {
            assert!(text.parse::<TransactionId>().is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn generate_backdates_valid_start() {
        let id = TransactionId::generate(AccountId::new(0, 0, 2));
        let now = Utc::now();
        assert!(id.valid_start < now);
        // Jitter is bounded; generated ids stay close to "now".
        assert!(now - id.valid_start < Duration::seconds(10));
        assert!(!id.scheduled);
        assert_eq!(id.nonce, None);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = TransactionId::generate(AccountId::new(0, 0, 2));
        let b = TransactionId::generate(AccountId::new(0, 0, 2));
        // Identical ids would require identical jitter in the same
        // nanosecond; treat a collision as a real failure.
        assert_ne!(a, b);
    }
}
