//! Per-hairstylist member management page.

use serde::Serialize;

use crate::domain::member::Member;
use crate::domain::types::HairstylistId;
use crate::forms::members::{AddMemberForm, AddMemberPayload};
use crate::repository::{MemberReader, MemberWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::views::member_table::{MemberTableData, MemberTableView};
use crate::views::signal::{ChangeSignal, DataVersion};

/// Source of the signed-in hairstylist, consulted once per page mount.
pub trait IdentityProvider {
    fn current(&self) -> Option<HairstylistId>;
}

impl IdentityProvider for Option<HairstylistId> {
    fn current(&self) -> Option<HairstylistId> {
        *self
    }
}

/// Fire-and-forget user acknowledgement.
pub trait Notifier {
    fn notify(&self, title: &str, description: &str);
}

pub const MEMBER_ADDED_TITLE: &str = "Member added";

#[derive(Debug)]
pub struct ReadyPage {
    hairstylist_id: HairstylistId,
    signal: ChangeSignal,
    dialog_open: bool,
    table: MemberTableView,
}

impl ReadyPage {
    fn new(hairstylist_id: HairstylistId) -> Self {
        let signal = ChangeSignal::new();
        let table = MemberTableView::scoped(hairstylist_id);
        table.subscribe(&signal);
        Self {
            hairstylist_id,
            signal,
            dialog_open: false,
            table,
        }
    }

    pub fn hairstylist_id(&self) -> HairstylistId {
        self.hairstylist_id
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn version(&self) -> DataVersion {
        self.signal.version()
    }

    pub fn table(&self) -> &MemberTableView {
        &self.table
    }
}

#[derive(Debug)]
pub enum PageState {
    Unresolved,
    /// No hairstylist behind the session. Terminal.
    Unauthenticated,
    Ready(ReadyPage),
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MemberPageView {
    /// Placeholder only: no table and no creation trigger.
    Placeholder,
    Ready {
        hairstylist_id: i32,
        dialog_open: bool,
        version: DataVersion,
        table: MemberTableData,
    },
}

#[derive(Debug)]
pub struct MemberManagementPage {
    state: PageState,
}

impl Default for MemberManagementPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberManagementPage {
    pub fn new() -> Self {
        Self {
            state: PageState::Unresolved,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Resolves the identity. Only the first call has an effect.
    pub fn mount<I>(&mut self, identity: &I)
    where
        I: IdentityProvider + ?Sized,
    {
        if !matches!(self.state, PageState::Unresolved) {
            return;
        }
        self.state = match identity.current() {
            Some(hairstylist_id) => PageState::Ready(ReadyPage::new(hairstylist_id)),
            None => PageState::Unauthenticated,
        };
    }

    fn ready_mut(&mut self) -> Option<&mut ReadyPage> {
        match &mut self.state {
            PageState::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn open_dialog(&mut self) {
        if let Some(page) = self.ready_mut() {
            page.dialog_open = true;
        }
    }

    pub fn close_dialog(&mut self) {
        if let Some(page) = self.ready_mut() {
            page.dialog_open = false;
        }
    }

    /// Validates and stores a new member owned by the page's hairstylist.
    /// On failure the dialog stays open and the version is unchanged.
    pub fn submit_member<R, N>(
        &mut self,
        repo: &R,
        notifier: &N,
        form: AddMemberForm,
    ) -> ServiceResult<Member>
    where
        R: MemberWriter + ?Sized,
        N: Notifier + ?Sized,
    {
        let page = self.ready_mut().ok_or(ServiceError::Unauthorized)?;

        let payload = AddMemberPayload::try_from(form).map_err(|e| {
            log::error!("Failed to validate new member: {e}");
            ServiceError::from(e)
        })?;

        let member = repo
            .create_member(&payload.into_domain(page.hairstylist_id))
            .inspect_err(|e| log::error!("Failed to create member: {e}"))?;

        self.member_added(notifier, &member);
        Ok(member)
    }

    /// Success path of the creation dialog: notify, close, bump.
    pub fn member_added<N>(&mut self, notifier: &N, member: &Member)
    where
        N: Notifier + ?Sized,
    {
        let Some(page) = self.ready_mut() else {
            return;
        };
        notifier.notify(
            MEMBER_ADDED_TITLE,
            &format!("{} was added to your members.", member.full_name),
        );
        page.dialog_open = false;
        page.signal.bump();
    }

    /// Lets the scoped table catch up with the signal. Returns whether the
    /// store was read.
    pub fn refresh<R>(&mut self, repo: &R) -> ServiceResult<bool>
    where
        R: MemberReader + ?Sized,
    {
        match self.ready_mut() {
            Some(page) => page.table.sync(repo),
            None => Ok(false),
        }
    }

    pub fn render(&self) -> MemberPageView {
        match &self.state {
            PageState::Ready(page) => MemberPageView::Ready {
                hairstylist_id: page.hairstylist_id.get(),
                dialog_open: page.dialog_open,
                version: page.version(),
                table: page.table.render(),
            },
            PageState::Unresolved | PageState::Unauthenticated => MemberPageView::Placeholder,
        }
    }
}
