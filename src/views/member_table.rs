//! Tabular listing of members, global or scoped to one hairstylist.

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::member::Member;
use crate::domain::types::HairstylistId;
use crate::repository::{MemberListQuery, MemberReader};
use crate::services::ServiceResult;
use crate::views::signal::{ChangeSignal, DataVersion};

pub const MEMBER_TABLE_COLUMNS: [&str; 7] = [
    "Name",
    "WhatsApp",
    "Instagram",
    "Last visit",
    "Visits",
    "Last service",
    "Latest comment",
];

pub const EMPTY_PLACEHOLDER: &str = "-";
pub const NO_MEMBERS_MESSAGE: &str = "No members found.";

/// Long form date, e.g. `January 5, 2026`.
pub fn format_long_date(date: NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// One rendered row; absent optional fields become [`EMPTY_PLACEHOLDER`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberRow {
    pub id: i32,
    pub full_name: String,
    pub whatsapp_number: String,
    pub instagram_handle: String,
    pub last_visit_date: String,
    pub total_visits: String,
    pub last_service_type: String,
    pub latest_hairstylist_comment: String,
}

fn or_placeholder<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| EMPTY_PLACEHOLDER.to_string())
}

impl From<&Member> for MemberRow {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.get(),
            full_name: member.full_name.to_string(),
            whatsapp_number: member.whatsapp_number.to_string(),
            instagram_handle: or_placeholder(member.instagram_handle.as_ref()),
            last_visit_date: or_placeholder(member.last_visit_date.map(format_long_date)),
            total_visits: member.total_visits.to_string(),
            last_service_type: or_placeholder(member.last_service_type.as_ref()),
            latest_hairstylist_comment: or_placeholder(
                member.latest_hairstylist_comment.as_ref(),
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody {
    Rows { rows: Vec<MemberRow> },
    /// Single row spanning every column.
    Empty { message: &'static str, colspan: usize },
}

impl TableBody {
    pub fn from_members(members: &[Member]) -> Self {
        if members.is_empty() {
            TableBody::Empty {
                message: NO_MEMBERS_MESSAGE,
                colspan: MEMBER_TABLE_COLUMNS.len(),
            }
        } else {
            TableBody::Rows {
                rows: members.iter().map(MemberRow::from).collect(),
            }
        }
    }

    pub fn rows(&self) -> &[MemberRow] {
        match self {
            TableBody::Rows { rows } => rows,
            TableBody::Empty { .. } => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberScope {
    All,
    Owner(HairstylistId),
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberTableData {
    pub columns: [&'static str; 7],
    pub body: Option<TableBody>,
}

/// Member table that re-reads the store after a [`ChangeSignal`] it is
/// subscribed to has fired. A table that was never loaded is always stale.
#[derive(Debug)]
pub struct MemberTableView {
    scope: MemberScope,
    search: Option<String>,
    body: Option<TableBody>,
    pending: Rc<Cell<Option<DataVersion>>>,
    loaded_version: Option<DataVersion>,
}

impl MemberTableView {
    pub fn new(scope: MemberScope) -> Self {
        Self {
            scope,
            search: None,
            body: None,
            pending: Rc::new(Cell::new(None)),
            loaded_version: None,
        }
    }

    pub fn global() -> Self {
        Self::new(MemberScope::All)
    }

    pub fn scoped(owner: HairstylistId) -> Self {
        Self::new(MemberScope::Owner(owner))
    }

    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn scope(&self) -> MemberScope {
        self.scope
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn subscribe(&self, signal: &ChangeSignal) {
        let pending = Rc::clone(&self.pending);
        signal.on_changed(move |version| pending.set(Some(version)));
    }

    fn query(&self) -> MemberListQuery {
        let query = MemberListQuery::default();
        let query = match self.scope {
            MemberScope::All => query,
            MemberScope::Owner(owner) => query.owner(owner),
        };
        match &self.search {
            Some(term) => query.search(term.clone()),
            None => query,
        }
    }

    /// Unconditional re-read of the store.
    pub fn load<R>(&mut self, repo: &R) -> ServiceResult<()>
    where
        R: MemberReader + ?Sized,
    {
        let members = repo.list_members(self.query()).inspect_err(|e| {
            log::error!("Failed to list members: {e}");
        })?;
        self.body = Some(TableBody::from_members(&members));
        Ok(())
    }

    /// Re-reads once if never loaded or a change was signalled since the last
    /// read. Returns whether a read happened.
    pub fn sync<R>(&mut self, repo: &R) -> ServiceResult<bool>
    where
        R: MemberReader + ?Sized,
    {
        let pending = self.pending.take();
        if self.body.is_some() && pending.is_none() {
            return Ok(false);
        }
        self.load(repo)?;
        self.loaded_version = pending.or(self.loaded_version);
        Ok(true)
    }

    pub fn is_stale(&self) -> bool {
        self.body.is_none() || self.pending.get().is_some()
    }

    /// Last signalled version this table has read, if any.
    pub fn loaded_version(&self) -> Option<DataVersion> {
        self.loaded_version
    }

    pub fn body(&self) -> Option<&TableBody> {
        self.body.as_ref()
    }

    pub fn render(&self) -> MemberTableData {
        MemberTableData {
            columns: MEMBER_TABLE_COLUMNS,
            body: self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{HairstylistComment, InstagramHandle, ServiceType, VisitCount};
    use crate::services::ServiceError;
    use crate::services::test_support::{FakeRepo, fixed_time, sample_member};

    #[test]
    fn row_uses_placeholders_for_missing_fields() {
        let row = MemberRow::from(&sample_member(1, 1, "Maria"));

        assert_eq!(row.full_name, "Maria");
        assert_eq!(row.whatsapp_number, "+79161234567");
        assert_eq!(row.instagram_handle, "-");
        assert_eq!(row.last_visit_date, "-");
        assert_eq!(row.total_visits, "0");
        assert_eq!(row.last_service_type, "-");
        assert_eq!(row.latest_hairstylist_comment, "-");
    }

    #[test]
    fn row_formats_present_fields() {
        let mut member = sample_member(1, 1, "Maria");
        member.instagram_handle = Some(InstagramHandle::new("maria.s").unwrap());
        member.last_visit_date = Some(fixed_time());
        member.total_visits = VisitCount::from(3);
        member.last_service_type = Some(ServiceType::new("Balayage").unwrap());
        member.latest_hairstylist_comment = Some(HairstylistComment::new("Loves it").unwrap());

        let row = MemberRow::from(&member);

        assert_eq!(row.instagram_handle, "@maria.s");
        assert_eq!(row.last_visit_date, "January 5, 2026");
        assert_eq!(row.total_visits, "3");
        assert_eq!(row.last_service_type, "Balayage");
        assert_eq!(row.latest_hairstylist_comment, "Loves it");
    }

    #[test]
    fn empty_result_renders_single_spanning_row() {
        let repo = FakeRepo::default();
        let mut table = MemberTableView::global();
        table.load(&repo).unwrap();

        assert_eq!(
            table.body(),
            Some(&TableBody::Empty {
                message: "No members found.",
                colspan: 7,
            })
        );
        assert_eq!(table.render().columns.len(), 7);
    }

    #[test]
    fn scoped_table_only_lists_owned_members() {
        let repo = FakeRepo::with_members(vec![
            sample_member(1, 1, "Maria"),
            sample_member(2, 2, "Joana"),
            sample_member(3, 1, "Rita"),
        ]);
        let mut table = MemberTableView::scoped(HairstylistId::new(1).unwrap());
        table.load(&repo).unwrap();

        let names: Vec<_> = table
            .body()
            .unwrap()
            .rows()
            .iter()
            .map(|r| r.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["Maria", "Rita"]);
    }

    #[test]
    fn sync_reads_only_when_stale() {
        let repo = FakeRepo::with_members(vec![sample_member(1, 1, "Maria")]);
        let signal = ChangeSignal::new();
        let mut table = MemberTableView::global();
        table.subscribe(&signal);

        assert!(table.sync(&repo).unwrap());
        assert!(!table.sync(&repo).unwrap());
        assert_eq!(repo.list_calls.get(), 1);

        signal.bump();
        assert!(table.is_stale());
        assert!(table.sync(&repo).unwrap());
        assert_eq!(table.loaded_version(), Some(signal.version()));
        assert!(!table.sync(&repo).unwrap());
        assert_eq!(repo.list_calls.get(), 2);
    }

    #[test]
    fn repeated_signals_yield_identical_rows() {
        let repo = FakeRepo::with_members(vec![sample_member(1, 1, "Maria")]);
        let signal = ChangeSignal::new();
        let mut table = MemberTableView::global();
        table.subscribe(&signal);

        signal.bump();
        table.sync(&repo).unwrap();
        let first = table.render().body;
        signal.bump();
        table.sync(&repo).unwrap();

        assert_eq!(first, table.render().body);
    }

    #[test]
    fn read_failure_propagates_unchanged() {
        let repo = FakeRepo::default();
        repo.fail_reads.set(true);
        let mut table = MemberTableView::global();

        let err = table.sync(&repo).unwrap_err();

        assert!(matches!(err, ServiceError::Repository(_)));
        assert!(table.body().is_none());
    }

    #[test]
    fn blank_search_is_ignored() {
        let table = MemberTableView::global().with_search(Some("  ".to_string()));
        assert!(table.search().is_none());
    }
}
