//! Request context for banner selection

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::constants::{ARTICLE_PATH_MARKER, DISMISSAL_COOKIE_PREFIX};
use crate::models::{Devices, Location};

use super::calendar::Calendar;

static MOBILE_UA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mobile|Android|iP(hone|od)|IEMobile").expect("valid regex"));

static TABLET_UA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tablet|iPad|PlayBook|Silk").expect("valid regex"));

/// Device class of the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    /// Classify a user-agent string; mobile patterns win over tablet ones
    pub fn from_user_agent(user_agent: &str) -> Self {
        if MOBILE_UA.is_match(user_agent) {
            Self::Mobile
        } else if TABLET_UA.is_match(user_agent) {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Whether a banner targeting `devices` may be shown on this class
    pub fn accepts(self, devices: Devices) -> bool {
        match devices {
            Devices::All => true,
            Devices::Mobile => self == Self::Mobile,
            Devices::Tablet => self == Self::Tablet,
            Devices::Desktop => self == Self::Desktop,
        }
    }
}

/// Kind of page the visitor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLocation {
    Homepage,
    Article,
}

impl PageLocation {
    /// Classify the referring page; article pages have `/article` in their path
    pub fn from_referer(referer: &str) -> Self {
        let path_is_article = match Url::parse(referer) {
            Ok(url) => url.path().contains(ARTICLE_PATH_MARKER),
            Err(_) => referer.contains(ARTICLE_PATH_MARKER),
        };

        if path_is_article {
            Self::Article
        } else {
            Self::Homepage
        }
    }

    pub fn accepts(self, location: Location) -> bool {
        match location {
            Location::Both => true,
            Location::Homepage => self == Self::Homepage,
            Location::Article => self == Self::Article,
        }
    }
}

/// Snapshot of everything selection needs to know about one request
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext {
    pub now: DateTime<Utc>,
    pub device: DeviceClass,
    pub location: PageLocation,
    pub is_logged_in: bool,
    pub calendar: Calendar,
}

impl SelectionContext {
    /// Build a context from raw request header values
    pub fn from_headers(
        now: DateTime<Utc>,
        user_agent: Option<&str>,
        referer: Option<&str>,
        authorization: Option<&str>,
        calendar: Calendar,
    ) -> Self {
        Self {
            now,
            device: DeviceClass::from_user_agent(user_agent.unwrap_or_default()),
            location: PageLocation::from_referer(referer.unwrap_or_default()),
            // Presence only; the token is not verified here
            is_logged_in: authorization.is_some_and(|value| !value.trim().is_empty()),
            calendar,
        }
    }
}

/// Dismissal cookies sent by the visitor, keyed by banner id
#[derive(Debug, Clone, Default)]
pub struct Dismissals {
    by_banner: HashMap<String, String>,
}

impl Dismissals {
    /// Keep only `banner_dismissed_<id>` cookies out of a cookie list
    pub fn from_cookies<'a, I>(cookies: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let by_banner = cookies
            .into_iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(DISMISSAL_COOKIE_PREFIX)
                    .filter(|id| !id.is_empty())
                    .map(|id| (id.to_string(), value.to_string()))
            })
            .collect();

        Self { by_banner }
    }

    /// Raw cookie value recorded for a banner, if any
    pub fn for_banner(&self, id: &Uuid) -> Option<&str> {
        self.by_banner.get(&id.to_string()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_banner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_banner.is_empty()
    }
}
