use crate::domain::hairstylist::Hairstylist;

/// Data required to render the hairstylists index page.
#[derive(Debug)]
pub struct HairstylistsPageData {
    /// Hairstylists with the number of members they own.
    pub hairstylists: Vec<(Hairstylist, usize)>,
}
