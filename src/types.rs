//! Type-safe vocabulary for sink configurations and BOM classification
//!
//! User-facing identifiers stay strings in `Configuration` (they may come from
//! a catalog the engine has never seen), but every closed set the engine
//! reasons about is an enum here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

use crate::error::SinkBomError;

/// Electronic basin type as selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum BasinKind {
    #[strum(serialize = "E_SINK")]
    #[serde(rename = "E_SINK")]
    ESink,
    #[strum(serialize = "E_SINK_DI")]
    #[serde(rename = "E_SINK_DI")]
    ESinkDi,
    #[strum(serialize = "E_DRAIN")]
    #[serde(rename = "E_DRAIN")]
    EDrain,
}

impl BasinKind {
    /// Catalog kit identifier for this basin type
    pub const fn kit_id(self) -> &'static str {
        match self {
            Self::ESink => "T2-BSN-ESK-KIT",
            Self::ESinkDi => "T2-BSN-ESK-DI-KIT",
            Self::EDrain => "T2-BSN-EDR-KIT",
        }
    }

    /// Reverse lookup from a resolved kit identifier
    pub fn from_kit_id(kit_id: &str) -> Option<Self> {
        match kit_id {
            "T2-BSN-ESK-KIT" => Some(Self::ESink),
            "T2-BSN-ESK-DI-KIT" => Some(Self::ESinkDi),
            "T2-BSN-EDR-KIT" => Some(Self::EDrain),
            _ => None,
        }
    }

    /// E-sink basins (plain or DI) count toward control-box sink channels
    pub const fn is_e_sink(self) -> bool {
        matches!(self, Self::ESink | Self::ESinkDi)
    }
}

/// Direction the operator works across the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum WorkflowDirection {
    #[default]
    #[strum(serialize = "LEFT_TO_RIGHT")]
    #[serde(rename = "LEFT_TO_RIGHT")]
    LeftToRight,
    #[strum(serialize = "RIGHT_TO_LEFT")]
    #[serde(rename = "RIGHT_TO_LEFT")]
    RightToLeft,
}

/// Faucet position on the sink deck.
///
/// Basins are numbered from 1. `Between(n)` sits between basin `n` and `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Placement {
    Center(usize),
    Between(usize),
}

impl Placement {
    /// Numeric sort key following deck order: center 1, between 1/2, center 2, ...
    pub const fn deck_order(self) -> usize {
        match self {
            Self::Center(n) => n.saturating_mul(2),
            Self::Between(n) => n.saturating_mul(2).saturating_add(1),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Center(n) => write!(f, "CENTER_OF_BASIN_{}", n),
            Self::Between(n) => write!(f, "BETWEEN_BASINS_{}_AND_{}", n, n.saturating_add(1)),
        }
    }
}

impl FromStr for Placement {
    type Err = SinkBomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase();
        let parse_index = |raw: &str| -> Result<usize, SinkBomError> {
            match raw.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n),
                _ => Err(SinkBomError::invalid_placement(s)),
            }
        };

        if let Some(rest) = tag.strip_prefix("CENTER_OF_BASIN_") {
            return Ok(Self::Center(parse_index(rest)?));
        }

        if let Some(rest) = tag.strip_prefix("BETWEEN_BASINS_") {
            let (left, right) = rest
                .split_once("_AND_")
                .ok_or_else(|| SinkBomError::invalid_placement(s))?;
            let left = parse_index(left)?;
            let right = parse_index(right)?;
            if left.checked_add(1) != Some(right) {
                return Err(SinkBomError::invalid_placement(s));
            }
            return Ok(Self::Between(left));
        }

        Err(SinkBomError::invalid_placement(s))
    }
}

impl TryFrom<String> for Placement {
    type Error = SinkBomError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Placement> for String {
    fn from(value: Placement) -> Self {
        value.to_string()
    }
}

/// Accessory sub-kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessoryKind {
    Storage,
    Lighting,
    Organization,
    Dispensers,
    Other,
}

/// Semantic category of a BOM item.
///
/// Written one way everywhere (JSON, CLI, catalog files): `SINK_BODY`,
/// `ACCESSORY/LIGHTING`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    System,
    SinkBody,
    Basin,
    FaucetSprayer,
    ControlBox,
    Accessory(AccessoryKind),
    ServicePart,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 12] = [
        Self::System,
        Self::SinkBody,
        Self::Basin,
        Self::FaucetSprayer,
        Self::ControlBox,
        Self::Accessory(AccessoryKind::Storage),
        Self::Accessory(AccessoryKind::Lighting),
        Self::Accessory(AccessoryKind::Organization),
        Self::Accessory(AccessoryKind::Dispensers),
        Self::Accessory(AccessoryKind::Other),
        Self::ServicePart,
        Self::Other,
    ];

    /// True for any accessory sub-kind
    pub const fn is_accessory(self) -> bool {
        matches!(self, Self::Accessory(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "SYSTEM"),
            Self::SinkBody => write!(f, "SINK_BODY"),
            Self::Basin => write!(f, "BASIN"),
            Self::FaucetSprayer => write!(f, "FAUCET_SPRAYER"),
            Self::ControlBox => write!(f, "CONTROL_BOX"),
            Self::Accessory(kind) => write!(f, "ACCESSORY/{}", kind),
            Self::ServicePart => write!(f, "SERVICE_PART"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

impl FromStr for Category {
    type Err = SinkBomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if let Some(kind) = upper.strip_prefix("ACCESSORY/") {
            return kind
                .parse::<AccessoryKind>()
                .map(Self::Accessory)
                .map_err(|_| SinkBomError::validation(format!("unknown category '{}'", s)));
        }
        match upper.as_str() {
            "SYSTEM" => Ok(Self::System),
            "SINK_BODY" => Ok(Self::SinkBody),
            "BASIN" => Ok(Self::Basin),
            "FAUCET_SPRAYER" => Ok(Self::FaucetSprayer),
            "CONTROL_BOX" => Ok(Self::ControlBox),
            "SERVICE_PART" => Ok(Self::ServicePart),
            "OTHER" => Ok(Self::Other),
            _ => Err(SinkBomError::validation(format!("unknown category '{}'", s))),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = SinkBomError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.to_string()
    }
}
