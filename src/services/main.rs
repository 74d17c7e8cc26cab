use chrono::{Duration, NaiveDateTime};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::member::Member;
use crate::dto::main::DashboardPageData;
use crate::repository::{HairstylistWriter, MemberListQuery, MemberReader};
use crate::services::members::resolve_hairstylist;
use crate::services::{ServiceResult, ensure_role};
use crate::views::stat::{StatCard, Trend};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

const RECENT_WINDOW_DAYS: i64 = 30;

/// Loads the dashboard summary. Admins see the whole salon, hairstylists only
/// the members they own.
pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    now: NaiveDateTime,
) -> ServiceResult<DashboardPageData>
where
    R: MemberReader + HairstylistWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let members = if user.has_role(SERVICE_ADMIN_ROLE) {
        repo.list_members(MemberListQuery::new())?
    } else if let Some(owner) = resolve_hairstylist(repo, user)? {
        repo.list_members(MemberListQuery::new().owner(owner))?
    } else {
        Vec::new()
    };

    Ok(DashboardPageData {
        stats: dashboard_stats(&members, now),
    })
}

/// Builds the dashboard cards. "Visited" counts members whose last visit
/// falls in the window.
pub fn dashboard_stats(members: &[Member], now: NaiveDateTime) -> Vec<StatCard> {
    let window = Duration::days(RECENT_WINDOW_DAYS);
    let recent_start = now - window;
    let previous_start = recent_start - window;

    let total_visits: i64 = members
        .iter()
        .map(|m| i64::from(m.total_visits.get()))
        .sum();
    let last_visits = || members.iter().filter_map(|m| m.last_visit_date);
    let recent = last_visits().filter(|date| *date >= recent_start).count();
    let previous = last_visits()
        .filter(|date| *date >= previous_start && *date < recent_start)
        .count();
    let never = members.iter().filter(|m| m.last_visit_date.is_none()).count();

    let mut recent_card = StatCard::new("Visited recently", recent)
        .with_description(format!("Last visit within {RECENT_WINDOW_DAYS} days"));
    if previous > 0 {
        let change = (recent as f64 - previous as f64) / previous as f64 * 100.0;
        recent_card = recent_card.with_trend(Trend {
            value: change,
            label: format!("vs previous {RECENT_WINDOW_DAYS} days"),
            is_positive: recent >= previous,
        });
    }

    vec![
        StatCard::new("Total members", members.len()),
        StatCard::new("Total visits", total_visits),
        recent_card,
        StatCard::new("Never visited", never)
            .with_description("Members without a recorded visit"),
    ]
}
