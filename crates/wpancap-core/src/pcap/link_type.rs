use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout;

/// Link-layer header type written into the global header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// IEEE 802.15.4 frames ending in their frame check sequence.
    Ieee802154WithFcs,
    /// IEEE 802.15.4 frames without frame check sequence.
    #[default]
    Ieee802154NoFcs,
}

impl LinkType {
    pub fn from_fcs(frame_check: bool) -> Self {
        if frame_check {
            LinkType::Ieee802154WithFcs
        } else {
            LinkType::Ieee802154NoFcs
        }
    }

    pub fn code(self) -> u32 {
        match self {
            LinkType::Ieee802154WithFcs => layout::LINKTYPE_IEEE802_15_4_WITHFCS,
            LinkType::Ieee802154NoFcs => layout::LINKTYPE_IEEE802_15_4_NOFCS,
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkType::Ieee802154WithFcs => write!(f, "802.15.4 with FCS ({})", self.code()),
            LinkType::Ieee802154NoFcs => write!(f, "802.15.4 without FCS ({})", self.code()),
        }
    }
}
