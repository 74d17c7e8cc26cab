//! Diesel implementation of the member store.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::member::{Member, NewMember, NewVisit, UpdateMember, later_visit};
use crate::domain::types::{MemberId, PublicId};
use crate::models::member::{
    Member as DbMember, NewMember as DbNewMember, UpdateMember as DbUpdateMember, VisitChanges,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MemberListQuery, MemberReader, MemberWriter};

const LIKE_ESCAPE: char = '\\';

/// `LIKE` pattern matching `term` literally anywhere in the value.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Handles are stored without the leading `@` shown in the UI.
fn handle_term(term: &str) -> &str {
    match term.trim_start_matches('@') {
        "" => term,
        handle => handle,
    }
}

fn into_domain(db_member: DbMember) -> RepositoryResult<Member> {
    Member::try_from(db_member).map_err(RepositoryError::from)
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        members::table
            .find(id.get())
            .first::<DbMember>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn get_member_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        members::table
            .filter(members::public_id.eq(public_id.as_bytes().as_slice()))
            .first::<DbMember>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_members(&self, query: MemberListQuery) -> RepositoryResult<Vec<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let mut items = members::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(owner) = query.owner_hairstylist_id {
            items = items.filter(members::owner_hairstylist_id.eq(owner.get()));
        }

        if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = contains_pattern(term);
            let handle_pattern = contains_pattern(handle_term(term));
            items = items.filter(
                members::full_name
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(members::whatsapp_number.like(pattern).escape(LIKE_ESCAPE))
                    .or(members::instagram_handle
                        .like(handle_pattern)
                        .escape(LIKE_ESCAPE)),
            );
        }

        items
            .order(members::id.asc())
            .load::<DbMember>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }
}

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let insertable: DbNewMember = new_member.into();
        let created = diesel::insert_into(members::table)
            .values(&insertable)
            .get_result::<DbMember>(&mut conn)?;

        into_domain(created)
    }

    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewMember> = new_members.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::insert_into(members::table)
                .values(&insertables)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }

    fn update_member(&self, id: MemberId, updates: &UpdateMember) -> RepositoryResult<Member> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let changes: DbUpdateMember = updates.into();
        let updated = diesel::update(members::table.find(id.get()))
            .set((&changes, members::updated_at.eq(diesel::dsl::now)))
            .get_result::<DbMember>(&mut conn)?;

        into_domain(updated)
    }

    fn record_visit(&self, id: MemberId, visit: &NewVisit) -> RepositoryResult<Member> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let updated = conn.transaction::<DbMember, diesel::result::Error, _>(|conn| {
            let stored = members::table
                .find(id.get())
                .select(members::last_visit_date)
                .first::<Option<NaiveDateTime>>(conn)?;

            let mut changes: VisitChanges = visit.into();
            changes.last_visit_date = Some(later_visit(stored, visit.visited_at));

            diesel::update(members::table.find(id.get()))
                .set((
                    &changes,
                    members::total_visits.eq(members::total_visits + 1),
                    members::updated_at.eq(diesel::dsl::now),
                ))
                .get_result::<DbMember>(conn)
        })?;

        into_domain(updated)
    }
}
