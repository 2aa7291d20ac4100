//! Tests for page accumulation

use meal_queue_core::core::{Keyed, Page, PageAccumulator};

#[derive(Debug, Clone)]
struct Recipe {
    id: String,
}

impl Keyed for Recipe {
    fn key(&self) -> &str {
        &self.id
    }
}

fn page(ids: &[&str], next: Option<&str>) -> Page<Recipe> {
    Page {
        items: ids.iter().map(|id| Recipe { id: (*id).to_string() }).collect(),
        next_cursor: next.map(str::to_string),
    }
}

#[test]
fn test_overlapping_pages_do_not_duplicate() {
    let mut acc = PageAccumulator::new();
    acc.push(page(&["r1", "r2", "r3"], Some("p2")));
    let added = acc.push(page(&["r3", "r4"], Some("p3")));
    assert_eq!(added, 1);
    assert_eq!(acc.next_cursor(), Some("p3"));
    assert!(acc.has_more());

    acc.push(page(&[], None));
    assert!(!acc.has_more());
    let ids: Vec<_> = acc.into_items().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["r1", "r2", "r3", "r4"]);
}
