//! Eligibility filter
//!
//! A banner is eligible when it passes every static and temporal gate for
//! the current request, before ranking and dismissal are considered.

use chrono::{DateTime, Utc};

use crate::models::{Repeat, Roadblock};

use super::calendar::Calendar;
use super::context::SelectionContext;

/// First gate a banner failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    Inactive,
    NotStarted,
    Ended,
    WrongDevice,
    WrongLocation,
    HiddenForLoggedIn,
    OffSchedule,
}

/// Run the gates in order and report the first failure
pub fn check(banner: &Roadblock, ctx: &SelectionContext) -> Result<(), Ineligible> {
    if !banner.is_active {
        return Err(Ineligible::Inactive);
    }

    if ctx.now < banner.start_date {
        return Err(Ineligible::NotStarted);
    }

    if banner.end_date.is_some_and(|end| ctx.now > end) {
        return Err(Ineligible::Ended);
    }

    if !ctx.device.accepts(banner.devices) {
        return Err(Ineligible::WrongDevice);
    }

    if !ctx.location.accepts(banner.location) {
        return Err(Ineligible::WrongLocation);
    }

    if banner.hide_for_logged_in && ctx.is_logged_in {
        return Err(Ineligible::HiddenForLoggedIn);
    }

    if !recurs_on(&banner.repeat, banner.start_date, ctx.now, &ctx.calendar) {
        return Err(Ineligible::OffSchedule);
    }

    Ok(())
}

/// Whether a banner with this cadence is scheduled on `now`'s date.
///
/// Range and open-ended banners share this rule; only the end-date gate
/// tells them apart.
pub fn recurs_on(
    repeat: &Repeat,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> bool {
    match repeat {
        Repeat::Never => calendar.same_day(now, start),
        Repeat::Daily => true,
        Repeat::Weekly => calendar.same_weekday(now, start),
        Repeat::Monthly => calendar.same_day_of_month(now, start),
        Repeat::Yearly => calendar.same_anniversary(now, start),
        // No schedule to enforce; ranking and dismissal still apply
        Repeat::Unrecognized(_) => true,
    }
}

/// Keep the eligible banners, preserving input order
pub fn filter_eligible<'a>(candidates: &'a [Roadblock], ctx: &SelectionContext) -> Vec<&'a Roadblock> {
    candidates
        .iter()
        .filter(|banner| match check(banner, ctx) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(banner_id = %banner.id, ?reason, "Roadblock not eligible");
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Devices, Location};
    use crate::selection::context::{DeviceClass, PageLocation};
    use crate::selection::fixtures::{at, banner, context};
    use chrono::Duration;

    #[test]
    fn test_inactive_is_never_eligible() {
        let now = at("2024-03-11T12:00:00Z");
        let mut b = banner(Repeat::Daily, now - Duration::days(3));
        b.is_active = false;
        assert_eq!(check(&b, &context(now)), Err(Ineligible::Inactive));
    }

    #[test]
    fn test_date_window_bounds_are_inclusive() {
        let start = at("2024-03-01T09:00:00Z");
        let end = at("2024-03-20T18:00:00Z");
        let mut b = banner(Repeat::Daily, start);
        b.end_date = Some(end);

        assert_eq!(check(&b, &context(start)), Ok(()));
        assert_eq!(check(&b, &context(end)), Ok(()));
        assert_eq!(
            check(&b, &context(start - Duration::milliseconds(1))),
            Err(Ineligible::NotStarted)
        );
        assert_eq!(
            check(&b, &context(end + Duration::milliseconds(1))),
            Err(Ineligible::Ended)
        );
    }

    #[test]
    fn test_device_gate() {
        let now = at("2024-03-11T12:00:00Z");
        let mut b = banner(Repeat::Daily, now - Duration::days(1));
        b.devices = Devices::Mobile;

        let mut ctx = context(now);
        ctx.device = DeviceClass::Desktop;
        assert_eq!(check(&b, &ctx), Err(Ineligible::WrongDevice));

        ctx.device = DeviceClass::Mobile;
        assert_eq!(check(&b, &ctx), Ok(()));
    }

    #[test]
    fn test_location_gate() {
        let now = at("2024-03-11T12:00:00Z");
        let mut b = banner(Repeat::Daily, now - Duration::days(1));
        b.location = Location::Article;

        let mut ctx = context(now);
        assert_eq!(check(&b, &ctx), Err(Ineligible::WrongLocation));

        ctx.location = PageLocation::Article;
        assert_eq!(check(&b, &ctx), Ok(()));
    }

    #[test]
    fn test_hidden_for_logged_in() {
        let now = at("2024-03-11T12:00:00Z");
        let mut b = banner(Repeat::Daily, now - Duration::days(1));
        b.hide_for_logged_in = true;

        let mut ctx = context(now);
        assert_eq!(check(&b, &ctx), Ok(()));

        ctx.is_logged_in = true;
        assert_eq!(check(&b, &ctx), Err(Ineligible::HiddenForLoggedIn));
    }

    #[test]
    fn test_never_requires_start_day() {
        let start = at("2024-03-11T08:00:00Z");
        let b = banner(Repeat::Never, start);

        assert_eq!(check(&b, &context(at("2024-03-11T23:00:00Z"))), Ok(()));
        assert_eq!(
            check(&b, &context(at("2024-03-12T01:00:00Z"))),
            Err(Ineligible::OffSchedule)
        );
    }

    #[test]
    fn test_recurrence_rules() {
        let cal = Calendar::utc();
        // Monday 15 January 2024
        let start = at("2024-01-15T10:00:00Z");

        assert!(recurs_on(&Repeat::Daily, start, at("2024-02-02T00:00:00Z"), &cal));

        assert!(recurs_on(&Repeat::Weekly, start, at("2024-01-22T23:00:00Z"), &cal));
        assert!(!recurs_on(&Repeat::Weekly, start, at("2024-01-23T10:00:00Z"), &cal));

        assert!(recurs_on(&Repeat::Monthly, start, at("2024-04-15T03:00:00Z"), &cal));
        assert!(!recurs_on(&Repeat::Monthly, start, at("2024-04-16T10:00:00Z"), &cal));

        assert!(recurs_on(&Repeat::Yearly, start, at("2025-01-15T20:00:00Z"), &cal));
        assert!(!recurs_on(&Repeat::Yearly, start, at("2025-02-15T10:00:00Z"), &cal));

        assert!(recurs_on(
            &Repeat::Unrecognized("hourly".to_string()),
            start,
            at("2024-03-03T00:00:00Z"),
            &cal
        ));
    }

    #[test]
    fn test_range_banner_uses_same_recurrence() {
        let start = at("2024-01-15T10:00:00Z");
        let mut b = banner(Repeat::Weekly, start);
        b.end_date = Some(at("2024-06-30T00:00:00Z"));

        assert_eq!(check(&b, &context(at("2024-01-29T12:00:00Z"))), Ok(()));
        assert_eq!(
            check(&b, &context(at("2024-01-30T12:00:00Z"))),
            Err(Ineligible::OffSchedule)
        );
    }

    #[test]
    fn test_filter_preserves_order() {
        let now = at("2024-03-11T12:00:00Z");
        let first = banner(Repeat::Daily, now - Duration::days(2));
        let mut hidden = banner(Repeat::Daily, now - Duration::days(2));
        hidden.is_active = false;
        let last = banner(Repeat::Daily, now - Duration::days(1));

        let candidates = vec![first.clone(), hidden, last.clone()];
        let eligible = filter_eligible(&candidates, &context(now));
        let ids: Vec<_> = eligible.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, last.id]);
    }
}
