//! Defines the `Category` type and how transactions are bucketed by category.
//!
//! A category acts like a label for a transaction, however a transaction may
//! only have one category, and it may have none at all.

use std::{cmp::Ordering, collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionKind;

/// The label shown for transactions without a (known) category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// The opaque identifier of a category, as issued by the transaction store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category ID.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for CategoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The bucket a transaction is totalled under.
///
/// Transactions without a category get their own variant so that no real
/// category ID can ever collide with the "no category" bucket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    /// The transaction references this category.
    Category(CategoryId),
    /// The transaction has no category.
    Uncategorized,
}

impl CategoryKey {
    /// The bucket for an optional category reference.
    pub fn from_optional(category_id: Option<&CategoryId>) -> Self {
        match category_id {
            Some(id) => Self::Category(id.clone()),
            None => Self::Uncategorized,
        }
    }

    /// The category ID, if any.
    pub fn category_id(&self) -> Option<&CategoryId> {
        match self {
            Self::Category(id) => Some(id),
            Self::Uncategorized => None,
        }
    }
}

impl Ord for CategoryKey {
    /// Real categories order by ID, the uncategorized bucket sorts last.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Category(a), Self::Category(b)) => a.cmp(b),
            (Self::Category(_), Self::Uncategorized) => Ordering::Less,
            (Self::Uncategorized, Self::Category(_)) => Ordering::Greater,
            (Self::Uncategorized, Self::Uncategorized) => Ordering::Equal,
        }
    }
}

impl PartialOrd for CategoryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(id) => write!(f, "{id}"),
            Self::Uncategorized => write!(f, "uncategorized"),
        }
    }
}

/// A category as received from the transaction store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// The ID of the category.
    pub id: String,
    /// The display name of the category.
    pub name: String,
    /// Whether the category is meant for income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// A category of income or expense, e.g. "Groceries", "Salary".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: String,
    /// Whether the category is meant for income or expenses.
    pub kind: TransactionKind,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: CategoryId(record.id),
            name: record.name,
            kind: record.kind,
        }
    }
}

/// Resolves category IDs to display names.
///
/// Report functions take this as a parameter instead of reaching for a global
/// map. It is implemented for [CategoryDirectory], for plain maps and for
/// closures.
pub trait CategoryLookup {
    /// The display name for `id`, or `None` if the category is unknown.
    fn name_of(&self, id: &CategoryId) -> Option<String>;

    /// The display name for a bucket, falling back to [UNCATEGORIZED_LABEL].
    fn label_for(&self, key: &CategoryKey) -> String {
        key.category_id()
            .and_then(|id| self.name_of(id))
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_owned())
    }
}

impl<F> CategoryLookup for F
where
    F: Fn(&CategoryId) -> Option<String>,
{
    fn name_of(&self, id: &CategoryId) -> Option<String> {
        self(id)
    }
}

impl CategoryLookup for HashMap<CategoryId, String> {
    fn name_of(&self, id: &CategoryId) -> Option<String> {
        self.get(id).cloned()
    }
}

/// An in-memory index of categories by ID.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    categories: HashMap<CategoryId, Category>,
}

impl CategoryDirectory {
    /// Index `categories` by ID.
    ///
    /// If two categories share an ID the later one wins.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|category| (category.id.clone(), category))
                .collect(),
        }
    }

    /// Build a directory straight from store records.
    pub fn from_records(records: impl IntoIterator<Item = CategoryRecord>) -> Self {
        Self::new(records.into_iter().map(Category::from))
    }

    /// Get a category by ID.
    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    /// The number of known categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the directory holds no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl CategoryLookup for CategoryDirectory {
    fn name_of(&self, id: &CategoryId) -> Option<String> {
        self.categories.get(id).map(|category| category.name.clone())
    }
}
