use serde::{Deserialize, Serialize};

pub use models::category::Model as Category;
pub use models::tag::Model as Tag;

/// Offer as returned to callers: category and tags resolved to records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

impl Offer {
    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// Offer as stored: foreign keys only. `tag_ids` is sorted and unique.
#[derive(Clone, Debug, PartialEq)]
pub struct OfferRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

impl OfferRow {
    pub fn from_model(m: models::offer::Model, tag_ids: Vec<i64>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            price: m.price,
            description: m.description,
            category_id: m.category_id,
            tag_ids,
        }
    }
}

/// Field values for creating or replacing an offer.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct OfferDraft {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

impl OfferDraft {
    pub(crate) fn normalized(mut self) -> Self {
        self.tag_ids = unique_sorted(self.tag_ids);
        self
    }
}

pub(crate) fn unique_sorted(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Conjunctive offer filter; `None` fields do not constrain. Price bounds are inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OfferFilter {
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl OfferFilter {
    pub fn by_category(category_id: i64) -> Self {
        Self { category_id: Some(category_id), ..Self::default() }
    }

    pub fn by_tag(tag_id: i64) -> Self {
        Self { tag_id: Some(tag_id), ..Self::default() }
    }

    pub fn by_price(price: f64) -> Self {
        Self { min_price: Some(price), max_price: Some(price), ..Self::default() }
    }

    pub fn matches(&self, row: &OfferRow) -> bool {
        if let Some(cid) = self.category_id {
            if row.category_id != Some(cid) { return false; }
        }
        if let Some(tid) = self.tag_id {
            if !row.tag_ids.contains(&tid) { return false; }
        }
        if let Some(min) = self.min_price {
            if row.price < min { return false; }
        }
        if let Some(max) = self.max_price {
            if row.price > max { return false; }
        }
        true
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTag {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category_id: Option<i64>, tag_ids: Vec<i64>, price: f64) -> OfferRow {
        OfferRow { id: 1, name: "x".into(), price, description: None, category_id, tag_ids }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(OfferFilter::default().matches(&row(None, vec![], 0.0)));
    }

    #[test]
    fn filter_requires_every_given_constraint() {
        let f = OfferFilter { category_id: Some(1), tag_id: Some(2), min_price: Some(10.0), max_price: Some(20.0) };
        assert!(f.matches(&row(Some(1), vec![2, 3], 10.0)));
        assert!(f.matches(&row(Some(1), vec![2], 20.0)));
        assert!(!f.matches(&row(Some(9), vec![2], 15.0)));
        assert!(!f.matches(&row(None, vec![2], 15.0)));
        assert!(!f.matches(&row(Some(1), vec![3], 15.0)));
        assert!(!f.matches(&row(Some(1), vec![2], 20.01)));
        assert!(!f.matches(&row(Some(1), vec![2], 9.99)));
    }

    #[test]
    fn by_price_is_exact() {
        let f = OfferFilter::by_price(20.0);
        assert!(f.matches(&row(None, vec![], 20.0)));
        assert!(!f.matches(&row(None, vec![], 20.5)));
    }

    #[test]
    fn draft_tags_are_deduplicated() {
        let d = OfferDraft { tag_ids: vec![3, 1, 3, 2, 1], ..OfferDraft::default() }.normalized();
        assert_eq!(d.tag_ids, vec![1, 2, 3]);
    }
}
