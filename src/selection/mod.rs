//! Roadblock banner selection
//!
//! Given the banners tagged for a network, pick the single banner (if any)
//! a visitor should see right now:
//!
//! 1. [`eligibility`] drops banners that are inactive, out of their date
//!    window, aimed at another device or page, hidden for logged-in
//!    visitors, or not scheduled today.
//! 2. [`priority`] ranks the rest (range campaigns first, newest start
//!    breaking ties).
//! 3. [`dismissal`] skips banners the visitor already closed within the
//!    banner's current recurrence period.
//!
//! Selection is pure: it reads a snapshot of banners, the request context
//! and the visitor's cookies, and writes nothing.

pub mod calendar;
pub mod context;
pub mod dismissal;
pub mod eligibility;
pub mod priority;

#[cfg(test)]
pub(crate) mod fixtures;

use serde::Serialize;

use crate::models::Roadblock;

pub use calendar::Calendar;
pub use context::{DeviceClass, Dismissals, PageLocation, SelectionContext};

/// The banner chosen for a visitor, with the priority it was ranked at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    #[serde(flatten)]
    pub roadblock: Roadblock,
    pub priority: u8,
}

/// Choose the banner to show, or `None` when nothing qualifies
pub fn select(
    candidates: &[Roadblock],
    ctx: &SelectionContext,
    dismissals: &Dismissals,
) -> Option<Selection> {
    let eligible = eligibility::filter_eligible(candidates, ctx);
    let ranked = priority::rank(eligible);
    let chosen = dismissal::first_undismissed(&ranked, dismissals, ctx.now, &ctx.calendar)?;

    Some(Selection {
        roadblock: chosen.banner.clone(),
        priority: chosen.priority,
    })
}
