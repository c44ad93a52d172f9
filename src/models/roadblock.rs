//! Roadblock banner model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::DISMISSAL_COOKIE_PREFIX;

/// Roadblock banner as read from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadblock {
    pub id: Uuid,
    pub link: String,
    pub image: RoadblockImage,
    /// Seconds before the close button appears (UI only)
    pub close_button_delay: i32,
    /// Seconds before the banner appears (UI only)
    pub banner_time_delay: i32,
    pub repeat: Repeat,
    pub networks: Networks,
    pub location: Location,
    pub devices: Devices,
    pub hide_for_logged_in: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Roadblock {
    /// A banner with an end date runs throughout an interval
    pub fn is_range(&self) -> bool {
        self.end_date.is_some()
    }

    /// Name of the cookie a visitor holds after dismissing this banner
    pub fn dismissal_cookie_name(&self) -> String {
        format!("{}{}", DISMISSAL_COOKIE_PREFIX, self.id)
    }
}

/// Banner image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadblockImage {
    pub url: String,
    pub public_id: String,
}

/// Recurrence cadence of a banner
///
/// Values outside the five known kinds are kept as `Unrecognized` so a
/// single bad record degrades instead of failing a whole selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    Never,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Repeat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Never => "never",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Never
    }
}

impl From<&str> for Repeat {
    fn from(value: &str) -> Self {
        match value {
            "never" => Self::Never,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page kinds a banner may appear on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Homepage,
    Article,
    Both,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::Article => "article",
            Self::Both => "both",
        }
    }
}

impl FromStr for Location {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homepage" => Ok(Self::Homepage),
            "article" => Ok(Self::Article),
            "both" => Ok(Self::Both),
            other => Err(UnknownVariant::new("location", other)),
        }
    }
}

/// Device classes a banner targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Devices {
    Mobile,
    Tablet,
    #[default]
    Desktop,
    All,
}

impl Devices {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
            Self::All => "all",
        }
    }
}

impl FromStr for Devices {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            "all" => Ok(Self::All),
            other => Err(UnknownVariant::new("devices", other)),
        }
    }
}

/// Networks a banner is published to: the literal `"all"` or a non-empty list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "NetworksRepr", into = "NetworksRepr")]
pub enum Networks {
    #[default]
    All,
    Only(Vec<String>),
}

impl Networks {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::All => serde_json::Value::String(NETWORKS_ALL.to_string()),
            Self::Only(list) => serde_json::Value::from(list.clone()),
        }
    }
}

const NETWORKS_ALL: &str = "all";

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NetworksRepr {
    Keyword(String),
    List(Vec<String>),
}

impl TryFrom<NetworksRepr> for Networks {
    type Error = String;

    fn try_from(repr: NetworksRepr) -> Result<Self, Self::Error> {
        match repr {
            NetworksRepr::Keyword(k) if k == NETWORKS_ALL => Ok(Self::All),
            NetworksRepr::Keyword(k) => Err(format!(
                "networks must be \"all\" or an array of network strings, got \"{k}\""
            )),
            NetworksRepr::List(list) if list.is_empty() => {
                Err("networks array must not be empty".to_string())
            }
            NetworksRepr::List(list) if list.iter().any(|n| n.trim().is_empty()) => {
                Err("network identifiers must not be blank".to_string())
            }
            NetworksRepr::List(list) => Ok(Self::Only(list)),
        }
    }
}

impl From<Networks> for NetworksRepr {
    fn from(networks: Networks) -> Self {
        match networks {
            Networks::All => NetworksRepr::Keyword(NETWORKS_ALL.to_string()),
            Networks::Only(list) => NetworksRepr::List(list),
        }
    }
}

/// A stored enumeration column held a value this build does not know
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} value \"{value}\"")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Fields for a banner about to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoadblock {
    pub link: String,
    pub image: RoadblockImage,
    pub close_button_delay: i32,
    pub banner_time_delay: i32,
    pub repeat: Repeat,
    pub networks: Networks,
    pub location: Location,
    pub devices: Devices,
    pub hide_for_logged_in: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadblockChanges {
    pub link: Option<String>,
    pub image: Option<RoadblockImage>,
    pub close_button_delay: Option<i32>,
    pub banner_time_delay: Option<i32>,
    pub repeat: Option<Repeat>,
    pub networks: Option<Networks>,
    pub location: Option<Location>,
    pub devices: Option<Devices>,
    pub hide_for_logged_in: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,
    /// `Some(None)` clears the end date
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}

/// Raw `roadblocks` row
#[derive(Debug, Clone, FromRow)]
pub struct RoadblockRow {
    pub id: Uuid,
    pub link: String,
    pub image_url: String,
    pub image_public_id: String,
    pub close_button_delay: i32,
    pub banner_time_delay: i32,
    pub repeat: String,
    pub networks: serde_json::Value,
    pub location: String,
    pub devices: String,
    pub hide_for_logged_in: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Why a stored row could not become a [`Roadblock`]
#[derive(Debug, thiserror::Error)]
pub enum MalformedRoadblock {
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),

    #[error("invalid networks: {0}")]
    Networks(#[from] serde_json::Error),
}

impl TryFrom<RoadblockRow> for Roadblock {
    type Error = MalformedRoadblock;

    fn try_from(row: RoadblockRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            link: row.link,
            image: RoadblockImage {
                url: row.image_url,
                public_id: row.image_public_id,
            },
            close_button_delay: row.close_button_delay,
            banner_time_delay: row.banner_time_delay,
            repeat: Repeat::from(row.repeat.as_str()),
            networks: serde_json::from_value(row.networks)?,
            location: row.location.parse()?,
            devices: row.devices.parse()?,
            hide_for_logged_in: row.hide_for_logged_in,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> RoadblockRow {
        let now = Utc::now();
        RoadblockRow {
            id: Uuid::new_v4(),
            link: "https://example.com/promo".to_string(),
            image_url: "https://cdn.example.com/a.png".to_string(),
            image_public_id: "banners/a".to_string(),
            close_button_delay: 5,
            banner_time_delay: 5,
            repeat: "weekly".to_string(),
            networks: json!(["news-east"]),
            location: "both".to_string(),
            devices: "all".to_string(),
            hide_for_logged_in: false,
            start_date: now,
            end_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_repeat_keeps_unknown_values() {
        assert_eq!(Repeat::from("daily"), Repeat::Daily);
        let odd = Repeat::from("hourly");
        assert_eq!(odd, Repeat::Unrecognized("hourly".to_string()));
        assert!(!odd.is_recognized());
        assert_eq!(odd.as_str(), "hourly");

        let parsed: Repeat = serde_json::from_value(json!("fortnightly")).unwrap();
        assert_eq!(parsed, Repeat::Unrecognized("fortnightly".to_string()));
        assert_eq!(serde_json::to_value(Repeat::Monthly).unwrap(), json!("monthly"));
    }

    #[test]
    fn test_networks_serde() {
        let all: Networks = serde_json::from_value(json!("all")).unwrap();
        assert_eq!(all, Networks::All);
        assert_eq!(serde_json::to_value(&all).unwrap(), json!("all"));

        let some: Networks = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(some, Networks::Only(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(some.to_json(), json!(["a", "b"]));

        assert!(serde_json::from_value::<Networks>(json!([])).is_err());
        assert!(serde_json::from_value::<Networks>(json!("everywhere")).is_err());
        assert!(serde_json::from_value::<Networks>(json!(["ok", " "])).is_err());
        assert!(serde_json::from_value::<Networks>(json!([1, 2])).is_err());
    }

    #[test]
    fn test_row_conversion() {
        let roadblock = Roadblock::try_from(row()).unwrap();
        assert_eq!(roadblock.repeat, Repeat::Weekly);
        assert_eq!(roadblock.location, Location::Both);
        assert_eq!(roadblock.devices, Devices::All);
        assert_eq!(roadblock.networks, Networks::Only(vec!["news-east".to_string()]));
        assert!(!roadblock.is_range());
        assert_eq!(
            roadblock.dismissal_cookie_name(),
            format!("banner_dismissed_{}", roadblock.id)
        );
    }

    #[test]
    fn test_row_with_unknown_location_is_rejected() {
        let mut bad = row();
        bad.location = "sidebar".to_string();
        let err = Roadblock::try_from(bad).unwrap_err();
        assert!(err.to_string().contains("sidebar"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let roadblock = Roadblock::try_from(row()).unwrap();
        let value = serde_json::to_value(&roadblock).unwrap();
        assert_eq!(value["hideForLoggedIn"], json!(false));
        assert_eq!(value["image"]["publicId"], json!("banners/a"));
        assert_eq!(value["endDate"], serde_json::Value::Null);
    }
}
