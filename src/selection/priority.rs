//! Priority ranking of eligible banners

use std::cmp::Ordering;

use crate::constants::FALLBACK_PRIORITY;
use crate::models::{Repeat, Roadblock};

/// Priority for a banner; lower numbers win.
///
/// Range campaigns outrank open-ended ones. Among range banners the more
/// frequent cadence wins; among open-ended banners one-time shows win,
/// then the less frequent cadence.
pub fn priority_of(is_range: bool, repeat: &Repeat) -> u8 {
    match (is_range, repeat) {
        (true, Repeat::Daily) => 1,
        (true, Repeat::Weekly) => 2,
        (true, Repeat::Monthly) => 3,
        (true, Repeat::Yearly) => 4,
        (false, Repeat::Never) => 5,
        (false, Repeat::Yearly) => 6,
        (false, Repeat::Monthly) => 7,
        (false, Repeat::Weekly) => 8,
        (false, Repeat::Daily) => 9,
        (true, Repeat::Never) | (_, Repeat::Unrecognized(_)) => FALLBACK_PRIORITY,
    }
}

/// An eligible banner paired with its priority
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub banner: &'a Roadblock,
    pub priority: u8,
}

/// Priority ascending, then most recent start first
fn precedence(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| b.banner.start_date.cmp(&a.banner.start_date))
}

/// Assign priorities and order the banners for display
pub fn rank<'a>(eligible: impl IntoIterator<Item = &'a Roadblock>) -> Vec<Ranked<'a>> {
    let mut ranked: Vec<Ranked<'a>> = eligible
        .into_iter()
        .map(|banner| Ranked {
            banner,
            priority: priority_of(banner.is_range(), &banner.repeat),
        })
        .collect();

    ranked.sort_by(precedence);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::fixtures::{at, banner};
    use chrono::Duration;

    #[test]
    fn test_priority_table() {
        assert_eq!(priority_of(true, &Repeat::Daily), 1);
        assert_eq!(priority_of(true, &Repeat::Weekly), 2);
        assert_eq!(priority_of(true, &Repeat::Monthly), 3);
        assert_eq!(priority_of(true, &Repeat::Yearly), 4);
        assert_eq!(priority_of(false, &Repeat::Never), 5);
        assert_eq!(priority_of(false, &Repeat::Yearly), 6);
        assert_eq!(priority_of(false, &Repeat::Monthly), 7);
        assert_eq!(priority_of(false, &Repeat::Weekly), 8);
        assert_eq!(priority_of(false, &Repeat::Daily), 9);
    }

    #[test]
    fn test_unlisted_combinations_fall_back() {
        assert_eq!(priority_of(true, &Repeat::Never), 10);
        assert_eq!(priority_of(false, &Repeat::Unrecognized("hourly".into())), 10);
        assert_eq!(priority_of(true, &Repeat::Unrecognized(String::new())), 10);
    }

    #[test]
    fn test_rank_orders_by_priority_then_recency() {
        let now = at("2024-03-11T12:00:00Z");

        let open_daily = banner(Repeat::Daily, now - Duration::days(1));
        let mut range_weekly = banner(Repeat::Weekly, now - Duration::days(30));
        range_weekly.end_date = Some(now + Duration::days(30));
        let older_never = banner(Repeat::Never, now - Duration::hours(5));
        let newer_never = banner(Repeat::Never, now - Duration::hours(1));

        let pool = vec![
            open_daily.clone(),
            older_never.clone(),
            range_weekly.clone(),
            newer_never.clone(),
        ];
        let ranked = rank(&pool);

        let order: Vec<_> = ranked.iter().map(|r| (r.banner.id, r.priority)).collect();
        assert_eq!(
            order,
            vec![
                (range_weekly.id, 2),
                (newer_never.id, 5),
                (older_never.id, 5),
                (open_daily.id, 9),
            ]
        );
    }
}
