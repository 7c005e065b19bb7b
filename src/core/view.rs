//! Role-scoped visibility, search, and pagination policy for the ledger
//! table.
//!
//! Privileged viewers page through the full history; public viewers get a
//! single read-only window of the newest entries, with the count of withheld
//! entries reported so the UI can label the table "(latest N)" instead of
//! silently truncating. The search filter always applies before pagination.

use crate::entities::BudgetEntry;

/// Who is looking at the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    /// May see and manage the full paginated history.
    Privileged,
    /// Read-only; sees only the most recent page-size window.
    Public,
}

/// What the viewer asked for: a page (1-indexed) and an optional search
/// filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page, 1-indexed. Zero and out-of-range values are clamped.
    pub page: usize,
    /// Case-insensitive substring filter applied before pagination.
    pub search: Option<String>,
}

impl PageRequest {
    /// Request for one page with no filter.
    #[must_use]
    pub const fn page(page: usize) -> Self {
        Self { page, search: None }
    }

    /// Request for the first page matching a search string.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            page: 1,
            search: Some(query.into()),
        }
    }
}

/// One page of the filtered ledger, plus the metadata the table needs.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerPage {
    /// The visible entries, newest first.
    pub entries: Vec<BudgetEntry>,
    /// Effective page after clamping, 1-indexed.
    pub page: usize,
    /// Pages available to this viewer (always at least 1).
    pub page_count: usize,
    /// How many entries matched the filter before pagination.
    pub total_matched: usize,
    /// Entries that exist beyond the visible window but are withheld from
    /// this viewer. Non-zero only for public viewers.
    pub withheld: usize,
}

impl LedgerPage {
    /// Whether entries exist that this viewer is not shown.
    #[must_use]
    pub const fn has_withheld(&self) -> bool {
        self.withheld > 0
    }
}

/// Applies the visibility policy: filter, then paginate for the viewer role.
///
/// The snapshot is expected newest-first, as delivered by the entry feed.
/// A requested page past the end of the filtered set (after a deletion or a
/// narrowing filter) is clamped back into range rather than producing an
/// empty page.
#[must_use]
pub fn paginate(
    entries: &[BudgetEntry],
    role: ViewerRole,
    request: &PageRequest,
    page_size: usize,
) -> LedgerPage {
    let page_size = page_size.max(1);

    let query = request
        .search
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let matched: Vec<&BudgetEntry> = match &query {
        Some(q) => entries.iter().filter(|e| matches_search(e, q)).collect(),
        None => entries.iter().collect(),
    };
    let total_matched = matched.len();

    match role {
        ViewerRole::Public => LedgerPage {
            entries: matched.into_iter().take(page_size).cloned().collect(),
            page: 1,
            page_count: 1,
            total_matched,
            withheld: total_matched.saturating_sub(page_size),
        },
        ViewerRole::Privileged => {
            let page_count = total_matched.div_ceil(page_size).max(1);
            let page = request.page.clamp(1, page_count);
            let entries = matched
                .into_iter()
                .skip((page - 1) * page_size)
                .take(page_size)
                .cloned()
                .collect();

            LedgerPage {
                entries,
                page,
                page_count,
                total_matched,
                withheld: 0,
            }
        }
    }
}

/// Whether an entry matches a lowercased search query. The query is checked
/// against the title, category, department, ISO date, type, fund, and impact.
fn matches_search(entry: &BudgetEntry, query: &str) -> bool {
    if entry.title.to_lowercase().contains(query)
        || entry.category.to_lowercase().contains(query)
        || entry.department.to_lowercase().contains(query)
    {
        return true;
    }

    entry.date.to_string().contains(query)
        || entry.entry_type.as_str().to_lowercase().contains(query)
        || entry
            .fund
            .is_some_and(|f| f.as_str().contains(query))
        || entry.impact.as_str().to_lowercase().contains(query)
}
