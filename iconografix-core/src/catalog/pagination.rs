//! Offset/limit pagination shared by search and random queries

use serde::{Deserialize, Serialize};

use super::ItemRecord;

/// Paging metadata returned alongside a page of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub count: usize,
    pub offset: usize,
    pub has_next: bool,
}

/// One page of query results, serialized as `{ data, pagination }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationResult {
    #[serde(rename = "data")]
    pub items: Vec<ItemRecord>,
    pub pagination: Pagination,
}

impl PaginationResult {
    /// Slice `items[offset..offset + limit]`, clamping both bounds to the list
    pub fn paginate(items: &[ItemRecord], limit: usize, offset: usize) -> Self {
        let total = items.len();
        let start = offset.min(total);
        let end = start.saturating_add(limit).min(total);
        let page = items[start..end].to_vec();
        let count = page.len();

        Self {
            items: page,
            pagination: Pagination {
                total,
                count,
                offset,
                has_next: offset.saturating_add(count) < total,
            },
        }
    }

    pub fn total(&self) -> usize {
        self.pagination.total
    }

    pub fn count(&self) -> usize {
        self.pagination.count
    }

    pub fn has_next(&self) -> bool {
        self.pagination.has_next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<ItemRecord> {
        (0..n)
            .map(|i| ItemRecord::from_file_name("TEST", &format!("icon-{i:02}.svg")))
            .collect()
    }

    #[test]
    fn test_count_and_has_next_over_grid() {
        for total in [0usize, 1, 5, 10] {
            let catalog = items(total);
            for limit in 0..12 {
                for offset in 0..14 {
                    let page = PaginationResult::paginate(&catalog, limit, offset);
                    let expected = limit.min(total.saturating_sub(offset));
                    assert_eq!(page.count(), expected, "total={total} limit={limit} offset={offset}");
                    assert_eq!(page.items.len(), page.count());
                    assert_eq!(page.has_next(), offset + page.count() < total);
                    assert_eq!(page.total(), total);
                }
            }
        }
    }

    #[test]
    fn test_page_contents() {
        let catalog = items(5);
        let page = PaginationResult::paginate(&catalog, 2, 3);
        let names: Vec<_> = page.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["icon-03", "icon-04"]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let page = PaginationResult::paginate(&items(3), 10, 50);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.offset, 50);
        assert!(!page.has_next());
    }

    #[test]
    fn test_huge_limit_does_not_overflow() {
        let page = PaginationResult::paginate(&items(3), usize::MAX, 1);
        assert_eq!(page.count(), 2);
    }

    #[test]
    fn test_wire_shape() {
        let page = PaginationResult::paginate(&items(3), 1, 0);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pagination"]["hasNext"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }
}
