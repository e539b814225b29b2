//! Link table of a rendered document.

use std::collections::BTreeMap;

use super::types::Metaline;

/// Mapping of link ids to URLs for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    urls: BTreeMap<usize, String>,
}

impl Links {
    /// Collect the links annotated on `metalines`.
    pub fn from_metalines(metalines: &[Metaline]) -> Self {
        let urls = metalines
            .iter()
            .filter_map(|line| line.extra())
            .map(|extra| (extra.link_id, extra.url.clone()))
            .collect();
        Self { urls }
    }

    pub fn contains(&self, link_id: usize) -> bool {
        self.urls.contains_key(&link_id)
    }

    /// URL of a link, if the id exists.
    pub fn get(&self, link_id: usize) -> Option<&str> {
        self.urls.get(&link_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterate over `(id, url)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.urls.iter().map(|(id, url)| (*id, url.as_str()))
    }

    /// Number of digits needed to type the largest link id.
    pub fn max_digits(&self) -> usize {
        self.urls
            .keys()
            .next_back()
            .map_or(0, |id| id.to_string().len())
    }

    /// Candidate link ids for partially typed digits.
    ///
    /// Once as many digits as [`Self::max_digits`] are typed the input is
    /// taken as final, whether or not such a link exists; callers check the
    /// result with [`Self::contains`].
    pub fn disambiguate(&self, digits: &str) -> Vec<usize> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Vec::new();
        }
        if digits.len() == self.max_digits() {
            return digits.parse().map(|id| vec![id]).unwrap_or_default();
        }
        self.urls
            .keys()
            .filter(|id| id.to_string().starts_with(digits))
            .copied()
            .collect()
    }
}
