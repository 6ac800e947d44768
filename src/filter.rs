use crate::resource::{Category, Resource};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    #[default]
    All,
    Recent,
    Favorites,
    Shared,
}

impl Subset {
    pub const ALL: [Subset; 4] = [
        Subset::All,
        Subset::Recent,
        Subset::Favorites,
        Subset::Shared,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subset::All => "all",
            Subset::Recent => "recent",
            Subset::Favorites => "favorites",
            Subset::Shared => "shared",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Subset::All => "All",
            Subset::Recent => "Recent",
            Subset::Favorites => "Favorites",
            Subset::Shared => "Shared",
        }
    }

    pub fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Subset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Subset::All),
            "recent" => Ok(Subset::Recent),
            "favorites" | "favourites" => Ok(Subset::Favorites),
            "shared" => Ok(Subset::Shared),
            unknown => Err(format!(
                "unknown subset '{}' (expected all, recent, favorites or shared)",
                unknown
            )),
        }
    }
}

/// Positional derivation rules for the non-"all" subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetRules {
    pub recent_count: usize,
    pub favorite_positions: Vec<usize>,
    pub shared_positions: Vec<usize>,
}

impl Default for SubsetRules {
    fn default() -> Self {
        SubsetRules {
            recent_count: 4,
            favorite_positions: vec![0, 3, 6],
            shared_positions: vec![1, 4],
        }
    }
}

impl SubsetRules {
    /// Members of `subset`, in collection order.
    pub fn resolve<'a>(&self, subset: Subset, collection: &'a [Resource]) -> Vec<&'a Resource> {
        match subset {
            Subset::All => collection.iter().collect(),
            Subset::Recent => collection.iter().take(self.recent_count).collect(),
            Subset::Favorites => project(collection, &self.favorite_positions),
            Subset::Shared => project(collection, &self.shared_positions),
        }
    }
}

fn project<'a>(collection: &'a [Resource], positions: &[usize]) -> Vec<&'a Resource> {
    collection
        .iter()
        .enumerate()
        .filter(|(idx, _)| positions.contains(idx))
        .map(|(_, resource)| resource)
        .collect()
}

/// Set of enabled categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySet {
    enabled: [bool; 4],
}

impl CategorySet {
    pub fn all() -> Self {
        CategorySet { enabled: [true; 4] }
    }

    pub fn empty() -> Self {
        CategorySet { enabled: [false; 4] }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.enabled[category.index()]
    }

    pub fn set(&mut self, category: Category, enabled: bool) {
        self.enabled[category.index()] = enabled;
    }

    pub fn is_empty(&self) -> bool {
        !self.enabled.iter().any(|&on| on)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        CategorySet::all()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for category in iter {
            set.set(category, true);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub subset: Subset,
    pub search: String,
    pub categories: CategorySet,
    pub view: ViewMode,
}

pub fn matches(resource: &Resource, lower_search: &str, categories: &CategorySet) -> bool {
    categories.contains(resource.category)
        && resource.name.to_lowercase().contains(lower_search)
}

/// Resolves `subset` against `collection`, then keeps the resources whose
/// category is enabled and whose name contains `search` (case-insensitive).
pub fn filter_resources<'a>(
    collection: &'a [Resource],
    rules: &SubsetRules,
    subset: Subset,
    search: &str,
    categories: &CategorySet,
) -> Vec<&'a Resource> {
    if categories.is_empty() {
        return Vec::new();
    }
    let lower_search = search.to_lowercase();
    rules
        .resolve(subset, collection)
        .into_iter()
        .filter(|resource| matches(resource, &lower_search, categories))
        .collect()
}
