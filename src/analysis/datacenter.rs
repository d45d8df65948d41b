// Datacenter partition key derived from the second octet of an IP address.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Datacenter {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    Unknown,
}

impl Datacenter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Datacenter::P1 => "P1",
            Datacenter::P2 => "P2",
            Datacenter::P3 => "P3",
            Datacenter::P4 => "P4",
            Datacenter::P5 => "P5",
            Datacenter::P6 => "P6",
            Datacenter::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Datacenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps "a.N.c.d" to P{N} for N in 1..=6. Anything else, including
/// garbage and strings without a second segment, is `Unknown`.
pub fn classify_datacenter(ip: &str) -> Datacenter {
    let Some(second) = ip.split('.').nth(1) else {
        return Datacenter::Unknown;
    };
    match second {
        "1" => Datacenter::P1,
        "2" => Datacenter::P2,
        "3" => Datacenter::P3,
        "4" => Datacenter::P4,
        "5" => Datacenter::P5,
        "6" => Datacenter::P6,
        _ => Datacenter::Unknown,
    }
}
