//! Fixed-size windowing over an already ordered result set.

/// Number of questions on every page.
pub const QUESTIONS_PER_PAGE: usize = 10;

pub const DEFAULT_PAGE: u32 = 1;

/// Returns the items of the 1-based `page`, i.e. `items[(page - 1) * 10 .. page * 10]`,
/// clipped to the input. Page `0` and pages past the end are empty.
pub fn paginate<T>(items: &[T], page: u32) -> &[T] {
    let Some(index) = (page as usize).checked_sub(1) else {
        return &[];
    };
    let start = index.saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
