use crate::error::SourceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Document,
    Image,
    Video,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Document,
        Category::Image,
        Category::Video,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Document => "document",
            Category::Image => "image",
            Category::Video => "video",
            Category::Other => "other",
        }
    }

    /// Plural label used by the filter menu.
    pub fn menu_label(self) -> &'static str {
        match self {
            Category::Document => "Documents",
            Category::Image => "Images",
            Category::Video => "Videos",
            Category::Other => "Other",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "document" | "documents" => Ok(Category::Document),
            "image" | "images" => Ok(Category::Image),
            "video" | "videos" => Ok(Category::Video),
            "other" => Ok(Category::Other),
            unknown => Err(format!(
                "unknown resource type '{}' (expected document, image, video or other)",
                unknown
            )),
        }
    }
}

/// One content item. Treated as an immutable value once it is in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(rename = "size")]
    pub size_label: String,
    #[serde(rename = "updated")]
    pub updated_label: String,
    #[serde(rename = "thumbnail", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl Resource {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        size_label: impl Into<String>,
        updated_label: impl Into<String>,
    ) -> Self {
        Resource {
            id: id.into(),
            name: name.into(),
            category,
            size_label: size_label.into(),
            updated_label: updated_label.into(),
            thumbnail_url: None,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }
}

/// Canonical, insertion-ordered resource collection with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    resources: Vec<Resource>,
}

impl Collection {
    pub fn new(resources: Vec<Resource>) -> Result<Self, SourceError> {
        let mut seen = HashSet::with_capacity(resources.len());
        for resource in &resources {
            if !seen.insert(resource.id.as_str()) {
                return Err(SourceError::DuplicateId(resource.id.clone()));
            }
        }
        Ok(Collection { resources })
    }

    pub fn as_slice(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resource count per category, in `Category::ALL` order.
    pub fn category_counts(&self) -> [(Category, usize); 4] {
        let mut counts = Category::ALL.map(|c| (c, 0));
        for resource in &self.resources {
            counts[resource.category.index()].1 += 1;
        }
        counts
    }
}

pub fn mock_resources() -> Vec<Resource> {
    vec![
        Resource::new(
            "1",
            "Annual Report 2023.pdf",
            Category::Document,
            "2.4 MB",
            "2 days ago",
        ),
        Resource::new(
            "2",
            "product-hero-image.jpg",
            Category::Image,
            "3.8 MB",
            "3 days ago",
        )
        .with_thumbnail("https://images.unsplash.com/photo-1555421689-3f034debb7a6?w=800"),
        Resource::new(
            "3",
            "company-intro.mp4",
            Category::Video,
            "24.8 MB",
            "1 week ago",
        ),
        Resource::new("4", "team-photo.jpg", Category::Image, "1.2 MB", "2 weeks ago")
            .with_thumbnail("https://images.unsplash.com/photo-1522071820081-009f0129c71c?w=800"),
        Resource::new(
            "5",
            "marketing-strategy.docx",
            Category::Document,
            "845 KB",
            "3 weeks ago",
        ),
        Resource::new(
            "6",
            "product-tutorial.mp4",
            Category::Video,
            "18.5 MB",
            "1 month ago",
        ),
        Resource::new(
            "7",
            "logo-dark-version.png",
            Category::Image,
            "245 KB",
            "1 month ago",
        )
        .with_thumbnail("https://images.unsplash.com/photo-1606113944644-89f6c7a343e0?w=800"),
        Resource::new(
            "8",
            "user-research.pdf",
            Category::Document,
            "1.8 MB",
            "1 month ago",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut resources = mock_resources();
        resources.push(Resource::new("3", "copy.mp4", Category::Video, "1 MB", "now"));
        let err = Collection::new(resources).unwrap_err();
        assert!(matches!(err, SourceError::DuplicateId(ref id) if id == "3"));
    }

    #[test]
    fn mock_collection_counts() {
        let collection = Collection::new(mock_resources()).unwrap();
        assert_eq!(collection.len(), 8);
        assert_eq!(
            collection.category_counts(),
            [
                (Category::Document, 3),
                (Category::Image, 3),
                (Category::Video, 2),
                (Category::Other, 0),
            ]
        );
        let with_thumbnails = collection
            .as_slice()
            .iter()
            .filter(|r| r.thumbnail_url.is_some())
            .count();
        assert_eq!(with_thumbnails, 3);
    }

    #[test]
    fn category_parses_singular_and_plural() {
        assert_eq!("Images".parse::<Category>(), Ok(Category::Image));
        assert_eq!(" video ".parse::<Category>(), Ok(Category::Video));
        assert!("audio".parse::<Category>().is_err());
    }
}
