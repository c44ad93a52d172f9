//! Dismissal reconciliation against per-banner cookies

use chrono::{DateTime, Utc};

use crate::models::Repeat;

use super::calendar::Calendar;
use super::context::Dismissals;
use super::priority::Ranked;

/// Whether a dismissal recorded as `cookie` still hides a banner at `now`.
///
/// A cookie whose timestamp cannot be read still counts as present.
pub fn is_suppressed(
    repeat: &Repeat,
    cookie: Option<&str>,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> bool {
    let Some(raw) = cookie else {
        return false;
    };
    let dismissed_at = calendar.parse_timestamp(raw);

    match repeat {
        Repeat::Never => true,
        Repeat::Daily => dismissed_at.is_some_and(|at| calendar.same_day(at, now)),
        Repeat::Weekly => dismissed_at.is_some_and(|at| calendar.same_week(at, now)),
        Repeat::Monthly => dismissed_at.is_some_and(|at| calendar.same_month(at, now)),
        Repeat::Yearly => dismissed_at.is_some_and(|at| calendar.same_year(at, now)),
        Repeat::Unrecognized(_) => false,
    }
}

/// First banner in display order the visitor has not dismissed for the current period
pub fn first_undismissed<'a>(
    ranked: &[Ranked<'a>],
    dismissals: &Dismissals,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> Option<Ranked<'a>> {
    ranked.iter().copied().find(|candidate| {
        let banner = candidate.banner;
        let suppressed = is_suppressed(&banner.repeat, dismissals.for_banner(&banner.id), now, calendar);
        if suppressed {
            tracing::debug!(banner_id = %banner.id, repeat = %banner.repeat, "Roadblock dismissed by visitor");
        }
        !suppressed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::fixtures::{at, banner};
    use crate::selection::priority::rank;
    use chrono::Duration;

    const NOW: &str = "2024-03-11T12:00:00Z";

    fn suppressed(repeat: Repeat, cookie: Option<&str>) -> bool {
        is_suppressed(&repeat, cookie, at(NOW), &Calendar::utc())
    }

    #[test]
    fn test_no_cookie_never_suppresses() {
        for repeat in [Repeat::Never, Repeat::Daily, Repeat::Weekly, Repeat::Monthly, Repeat::Yearly] {
            assert!(!suppressed(repeat, None));
        }
    }

    #[test]
    fn test_never_is_permanent() {
        assert!(suppressed(Repeat::Never, Some("2001-01-01T00:00:00Z")));
        assert!(suppressed(Repeat::Never, Some("garbage")));
    }

    #[test]
    fn test_daily_resets_at_midnight() {
        assert!(suppressed(Repeat::Daily, Some("2024-03-11T00:05:00Z")));
        assert!(!suppressed(Repeat::Daily, Some("2024-03-10T23:55:00Z")));
        assert!(!suppressed(Repeat::Daily, Some("not a date")));
    }

    #[test]
    fn test_weekly_needs_recent_same_weekday() {
        assert!(suppressed(Repeat::Weekly, Some("2024-03-11T08:00:00Z")));
        // Yesterday: within seven days but another weekday
        assert!(!suppressed(Repeat::Weekly, Some("2024-03-10T12:00:00Z")));
        // Same weekday a week ago: seven days is not "within the last seven days"
        assert!(!suppressed(Repeat::Weekly, Some("2024-03-04T12:00:00Z")));
    }

    #[test]
    fn test_monthly_and_yearly() {
        assert!(suppressed(Repeat::Monthly, Some("2024-03-01T00:00:00Z")));
        assert!(!suppressed(Repeat::Monthly, Some("2024-02-29T23:00:00Z")));
        assert!(!suppressed(Repeat::Monthly, Some("2023-03-11T12:00:00Z")));

        assert!(suppressed(Repeat::Yearly, Some("2024-01-01T00:00:00Z")));
        assert!(!suppressed(Repeat::Yearly, Some("2023-12-31T23:59:59Z")));
    }

    #[test]
    fn test_date_only_cookie_counts_as_dated() {
        assert!(suppressed(Repeat::Daily, Some("2024-03-11")));
        assert!(!suppressed(Repeat::Daily, Some("2024-03-10")));
        assert!(suppressed(Repeat::Monthly, Some("2024-03-02")));
        assert!(suppressed(Repeat::Yearly, Some("2024-01-15")));
    }

    #[test]
    fn test_unrecognized_is_never_suppressed() {
        assert!(!suppressed(Repeat::Unrecognized("hourly".into()), Some(NOW)));
    }

    #[test]
    fn test_first_undismissed_walks_in_order() {
        let now = at(NOW);
        let top = banner(Repeat::Never, now - Duration::hours(2));
        let next = banner(Repeat::Daily, now - Duration::days(2));
        let pool = vec![top.clone(), next.clone()];
        let ranked = rank(&pool);

        let top_cookie = top.dismissal_cookie_name();
        let dismissals = Dismissals::from_cookies(vec![(top_cookie.as_str(), "2024-03-11T10:00:00Z")]);

        let chosen = first_undismissed(&ranked, &dismissals, now, &Calendar::utc()).unwrap();
        assert_eq!(chosen.banner.id, next.id);
        assert_eq!(chosen.priority, 9);

        let none = Dismissals::default();
        let chosen = first_undismissed(&ranked, &none, now, &Calendar::utc()).unwrap();
        assert_eq!(chosen.banner.id, top.id);
    }
}
