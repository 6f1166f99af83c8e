//! This modules defines the common functionality for paging data.

/// The config for pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: usize,
    /// The maximum records to return per page when not specified in a request.
    pub default_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// Select the items on the 1-based `page` where each page holds `page_size` items.
///
/// Order is preserved. Page zero, an empty page size and pages past the end
/// all give an empty page.
pub fn paginate<T>(items: impl IntoIterator<Item = T>, page: usize, page_size: usize) -> Vec<T> {
    let Some(offset) = page
        .checked_sub(1)
        .and_then(|page_index| page_index.checked_mul(page_size))
    else {
        return Vec::new();
    };

    items.into_iter().skip(offset).take(page_size).collect()
}
