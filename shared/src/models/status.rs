//! Order status state machine
//!
//! Status is a closed enum; raw strings are parsed case-insensitively at
//! the input boundary only. All internal logic compares the enum.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Booking lifecycle status
///
/// Initial state on creation is `Pending`. Item/customer/service mutation
/// is only permitted while pending; saving an edit forces the status back
/// to `Pending`. `Completed` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Ready,
    Completed,
    Canceled,
}

impl OrderStatus {
    /// Canonical wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Whether item/customer/service mutation is permitted in this state
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether this state admits no further transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    /// Whether a status-change operation from `self` to `to` is legal
    ///
    /// Forward moves may skip stages (operators batch work); cancellation
    /// is reachable from every non-terminal state; terminal states admit
    /// nothing. Re-opening happens only through the edit path, which
    /// forces `Pending` on save.
    pub const fn can_transition(&self, to: OrderStatus) -> bool {
        match (self, to) {
            (Self::Pending, Self::InProgress | Self::Ready | Self::Completed | Self::Canceled) => {
                true
            }
            (Self::InProgress, Self::Ready | Self::Completed | Self::Canceled) => true,
            (Self::Ready, Self::Completed | Self::Canceled) => true,
            _ => false,
        }
    }

    /// Whether downstream revenue recognition counts this booking
    pub const fn counts_as_revenue(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized order status: {:?}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    /// Case-insensitive parse; an empty string maps to `Pending`
    /// (legacy records stored no status before the first transition)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pending" => Ok(Self::Pending),
            "in-progress" | "in progress" | "inprogress" => Ok(Self::InProgress),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
