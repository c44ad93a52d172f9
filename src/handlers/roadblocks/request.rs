//! Roadblock request DTOs and extractors

use std::borrow::Cow;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{HeaderName, AUTHORIZATION, REFERER, USER_AGENT},
        request::Parts,
    },
};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::{
    constants::{
        DEFAULT_BANNER_TIME_DELAY, DEFAULT_CLOSE_BUTTON_DELAY, MAX_BANNER_TIME_DELAY,
        MAX_CLOSE_BUTTON_DELAY, MAX_LINK_LENGTH,
    },
    models::{Devices, Location, Networks, NewRoadblock, Repeat, RoadblockChanges, RoadblockImage},
    selection::{Dismissals, SelectionContext},
    state::AppState,
    utils::validate_link,
};

/// Banner image payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    #[validate(length(min = 1, message = "Image URL is required"))]
    pub url: String,

    #[validate(length(min = 1, message = "Image public ID is required"))]
    pub public_id: String,
}

impl From<ImageRequest> for RoadblockImage {
    fn from(image: ImageRequest) -> Self {
        Self {
            url: image.url,
            public_id: image.public_id,
        }
    }
}

/// Create roadblock request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateRoadblockRequest {
    #[validate(length(min = 1, max = MAX_LINK_LENGTH), custom(function = "link_format"))]
    pub link: String,

    #[validate(nested)]
    pub image: ImageRequest,

    /// Seconds before the close button appears
    #[serde(default = "default_close_button_delay")]
    #[validate(range(min = 0, max = MAX_CLOSE_BUTTON_DELAY))]
    pub close_button_delay: i32,

    /// Seconds before the banner appears
    #[serde(default = "default_banner_time_delay")]
    #[validate(range(min = 0, max = MAX_BANNER_TIME_DELAY))]
    pub banner_time_delay: i32,

    #[serde(default)]
    #[validate(custom(function = "known_repeat"))]
    pub repeat: Repeat,

    #[serde(default)]
    pub networks: Networks,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub devices: Devices,

    #[serde(default)]
    pub hide_for_logged_in: bool,

    pub start_date: DateTime<Utc>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateRoadblockRequest {
    pub fn into_new_roadblock(self) -> NewRoadblock {
        NewRoadblock {
            link: self.link.trim().to_string(),
            image: self.image.into(),
            close_button_delay: self.close_button_delay,
            banner_time_delay: self.banner_time_delay,
            repeat: self.repeat,
            networks: self.networks,
            location: self.location,
            devices: self.devices,
            hide_for_logged_in: self.hide_for_logged_in,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
        }
    }
}

/// Update roadblock request; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_fields"))]
pub struct UpdateRoadblockRequest {
    #[validate(length(min = 1, max = MAX_LINK_LENGTH))]
    pub link: Option<String>,

    pub image: Option<ImageRequest>,

    #[validate(range(min = 0, max = MAX_CLOSE_BUTTON_DELAY))]
    pub close_button_delay: Option<i32>,

    #[validate(range(min = 0, max = MAX_BANNER_TIME_DELAY))]
    pub banner_time_delay: Option<i32>,

    pub repeat: Option<Repeat>,
    pub networks: Option<Networks>,
    pub location: Option<Location>,
    pub devices: Option<Devices>,
    pub hide_for_logged_in: Option<bool>,
    pub start_date: Option<DateTime<Utc>>,

    /// `null` clears the end date, absence keeps it
    #[serde(default, deserialize_with = "present_or_null")]
    pub end_date: Option<Option<DateTime<Utc>>>,

    pub is_active: Option<bool>,
}

impl UpdateRoadblockRequest {
    /// Whether the update touches the schedule window
    pub fn changes_window(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    pub fn into_changes(self) -> RoadblockChanges {
        RoadblockChanges {
            link: self.link.map(|link| link.trim().to_string()),
            image: self.image.map(Into::into),
            close_button_delay: self.close_button_delay,
            banner_time_delay: self.banner_time_delay,
            repeat: self.repeat,
            networks: self.networks,
            location: self.location,
            devices: self.devices,
            hide_for_logged_in: self.hide_for_logged_in,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
        }
    }
}

fn default_close_button_delay() -> i32 {
    DEFAULT_CLOSE_BUTTON_DELAY
}

fn default_banner_time_delay() -> i32 {
    DEFAULT_BANNER_TIME_DELAY
}

fn default_true() -> bool {
    true
}

/// Distinguish an explicit `null` from an absent field
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn link_format(link: &str) -> Result<(), ValidationError> {
    validate_link(link).map_err(|msg| invalid("link", msg))
}

fn known_repeat(repeat: &Repeat) -> Result<(), ValidationError> {
    if repeat.is_recognized() {
        Ok(())
    } else {
        Err(invalid(
            "repeat",
            "Repeat must be one of never, daily, weekly, monthly, yearly",
        ))
    }
}

fn window_is_ordered(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(invalid(
            "end_date",
            "End date must be on or after the start date",
        )),
        _ => Ok(()),
    }
}

fn validate_create_window(req: &CreateRoadblockRequest) -> Result<(), ValidationError> {
    window_is_ordered(req.start_date, req.end_date)
}

fn validate_update_fields(req: &UpdateRoadblockRequest) -> Result<(), ValidationError> {
    if let Some(link) = &req.link {
        link_format(link)?;
    }
    if let Some(image) = &req.image {
        if image.url.is_empty() || image.public_id.is_empty() {
            return Err(invalid("image", "Image URL and public ID are required"));
        }
    }
    if let Some(repeat) = &req.repeat {
        known_repeat(repeat)?;
    }
    if let (Some(start), Some(end)) = (req.start_date, req.end_date.flatten()) {
        window_is_ordered(start, Some(end))?;
    }
    Ok(())
}

/// Everything the selection engine reads from an incoming request
#[derive(Debug, Clone)]
pub struct Visitor {
    pub context: SelectionContext,
    pub dismissals: Dismissals,
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: HeaderName| parts.headers.get(name).and_then(|v| v.to_str().ok());
        // Any non-blank value counts, readable or not
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()));

        let context = SelectionContext::from_headers(
            Utc::now(),
            header(USER_AGENT),
            header(REFERER),
            authorization.as_deref(),
            state.calendar(),
        );

        let jar = CookieJar::from_headers(&parts.headers);
        let dismissals = Dismissals::from_cookies(jar.iter().map(|c| (c.name(), c.value())));

        Ok(Self {
            context,
            dismissals,
        })
    }
}
