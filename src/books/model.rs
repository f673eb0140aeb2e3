//! Catalog item held in the `libros` table.

/// A book in the catalog. `id` is `None` until inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: Option<i64>,
    title: String,
    author: String,
    year: i64,
    available: bool,
}

impl Book {
    /// New books start out available.
    pub fn new(title: &str, author: &str, year: i64) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            year,
            available: true,
        }
    }

    pub fn from_stored(id: i64, title: String, author: String, year: i64, available: bool) -> Self {
        Self {
            id: Some(id),
            title,
            author,
            year,
            available,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub(crate) fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}
