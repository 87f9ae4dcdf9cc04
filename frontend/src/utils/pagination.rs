pub const ROWS_PER_PAGE_OPTIONS: [u32; 4] = [10, 20, 50, 100];
pub const PAGE_LINK_WINDOW: u32 = 5;

pub fn page_count(total: u64, per_page: u32) -> u32 {
    if per_page == 0 || total == 0 {
        return 1;
    }
    let pages = total.div_ceil(per_page as u64);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// 1-based index range shown on `page`; `(0, 0)` for an empty result.
pub fn visible_range(page: u32, per_page: u32, total: u64) -> (u64, u64) {
    if total == 0 || per_page == 0 {
        return (0, 0);
    }
    let page = page.clamp(1, page_count(total, per_page)) as u64;
    let first = (page - 1) * per_page as u64 + 1;
    let last = (page * per_page as u64).min(total);
    (first, last)
}

/// "Mostrando 21 a 40 de 41 produtos"
pub fn page_report(page: u32, per_page: u32, total: u64, noun: &str) -> String {
    let (first, last) = visible_range(page, per_page, total);
    format!("Mostrando {} a {} de {} {}", first, last, total, noun)
}

/// Up to `PAGE_LINK_WINDOW` page numbers centred on `page`.
pub fn page_links(page: u32, last_page: u32) -> Vec<u32> {
    let last_page = last_page.max(1);
    let window = PAGE_LINK_WINDOW.min(last_page);
    let page = page.clamp(1, last_page);
    let half = window / 2;
    let start = page
        .saturating_sub(half)
        .max(1)
        .min(last_page - window + 1);
    (start..start + window).collect()
}

/// Rows of `page` for tables paginated in memory.
pub fn paginate_slice<T: Clone>(items: &[T], page: u32, per_page: u32) -> Vec<T> {
    if per_page == 0 {
        return items.to_vec();
    }
    let start = (page.max(1) as usize - 1) * per_page as usize;
    items
        .iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(41, 20), 3);
        assert_eq!(page_count(40, 20), 2);
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_count(5, 0), 1);
    }

    #[test]
    fn report_matches_table_footer() {
        assert_eq!(page_report(2, 20, 41, "produtos"), "Mostrando 21 a 40 de 41 produtos");
        assert_eq!(page_report(3, 20, 41, "produtos"), "Mostrando 41 a 41 de 41 produtos");
        assert_eq!(page_report(1, 10, 0, "categorias"), "Mostrando 0 a 0 de 0 categorias");
        assert_eq!(page_report(9, 10, 15, "produtos"), "Mostrando 11 a 15 de 15 produtos");
    }

    #[test]
    fn page_links_slide_and_clamp() {
        assert_eq!(page_links(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_links(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_links(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_links(2, 3), vec![1, 2, 3]);
        assert_eq!(page_links(1, 0), vec![1]);
    }

    #[test]
    fn slices_local_pages() {
        let rows: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate_slice(&rows, 1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginate_slice(&rows, 3, 5), vec![11, 12]);
        assert!(paginate_slice(&rows, 4, 5).is_empty());
        assert_eq!(paginate_slice(&rows, 0, 10).len(), 10);
    }
}
