//! Builders shared by selection tests

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Devices, Location, Networks, Repeat, Roadblock, RoadblockImage};

use super::calendar::Calendar;
use super::context::{DeviceClass, PageLocation, SelectionContext};

pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// Active, open-ended banner shown everywhere to everyone
pub fn banner(repeat: Repeat, start_date: DateTime<Utc>) -> Roadblock {
    Roadblock {
        id: Uuid::new_v4(),
        link: "https://example.com/promo".to_string(),
        image: RoadblockImage {
            url: "https://cdn.example.com/promo.png".to_string(),
            public_id: "roadblocks/promo".to_string(),
        },
        close_button_delay: 5,
        banner_time_delay: 5,
        repeat,
        networks: Networks::All,
        location: Location::Both,
        devices: Devices::All,
        hide_for_logged_in: false,
        start_date,
        end_date: None,
        is_active: true,
        created_at: start_date,
        updated_at: start_date,
    }
}

/// Logged-out desktop visitor on the homepage
pub fn context(now: DateTime<Utc>) -> SelectionContext {
    SelectionContext {
        now,
        device: DeviceClass::Desktop,
        location: PageLocation::Homepage,
        is_logged_in: false,
        calendar: Calendar::utc(),
    }
}
