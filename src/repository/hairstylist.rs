//! Repository implementation for hairstylists.

use std::collections::HashMap;

use diesel::{prelude::*, upsert::excluded};

use crate::domain::hairstylist::{Hairstylist, NewHairstylist};
use crate::domain::types::{HairstylistEmail, HairstylistId};
use crate::models::hairstylist::{
    Hairstylist as DbHairstylist, NewHairstylist as DbNewHairstylist,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, HairstylistReader, HairstylistWriter};

impl HairstylistWriter for DieselRepository {
    fn create_or_update_hairstylist(
        &self,
        new_hairstylist: &NewHairstylist,
    ) -> RepositoryResult<Hairstylist> {
        use crate::schema::hairstylists;

        let mut conn = self.conn()?;

        let db_new_hairstylist: DbNewHairstylist = new_hairstylist.into();

        let db_hairstylist = diesel::insert_into(hairstylists::table)
            .values(&db_new_hairstylist)
            .on_conflict(hairstylists::email)
            .do_update()
            .set(hairstylists::name.eq(excluded(hairstylists::name)))
            .get_result::<DbHairstylist>(&mut conn)?;

        Hairstylist::try_from(db_hairstylist).map_err(RepositoryError::from)
    }
}

impl HairstylistReader for DieselRepository {
    fn get_hairstylist_by_id(&self, id: HairstylistId) -> RepositoryResult<Option<Hairstylist>> {
        use crate::schema::hairstylists;

        let mut conn = self.conn()?;
        let db_hairstylist = hairstylists::table
            .find(id.get())
            .first::<DbHairstylist>(&mut conn)
            .optional()?;

        db_hairstylist
            .map(|h| Hairstylist::try_from(h).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_hairstylist_by_email(
        &self,
        email: &HairstylistEmail,
    ) -> RepositoryResult<Option<Hairstylist>> {
        use crate::schema::hairstylists;

        let mut conn = self.conn()?;
        let db_hairstylist = hairstylists::table
            .filter(hairstylists::email.eq(email.as_str()))
            .first::<DbHairstylist>(&mut conn)
            .optional()?;

        db_hairstylist
            .map(|h| Hairstylist::try_from(h).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_hairstylists_with_member_counts(
        &self,
    ) -> RepositoryResult<Vec<(Hairstylist, usize)>> {
        use crate::schema::{hairstylists, members};

        let mut conn = self.conn()?;
        let db_hairstylists = hairstylists::table
            .order(hairstylists::name.asc())
            .load::<DbHairstylist>(&mut conn)?;

        let mut counts: HashMap<i32, usize> = HashMap::new();
        for owner_id in members::table
            .select(members::owner_hairstylist_id)
            .load::<i32>(&mut conn)?
        {
            *counts.entry(owner_id).or_default() += 1;
        }

        db_hairstylists
            .into_iter()
            .map(|db_hairstylist| {
                let members_count = counts.get(&db_hairstylist.id).copied().unwrap_or(0);
                let hairstylist =
                    Hairstylist::try_from(db_hairstylist).map_err(RepositoryError::from)?;
                Ok((hairstylist, members_count))
            })
            .collect()
    }
}
