//! 历史记录分页
//!
//! offset/limit 翻页：首页从 0 开始，「显示更多」把偏移量推进一个
//! 页长；返回条数不足一页即视为最后一页。

use crate::HistoryItem;

/// 历史页固定页长
pub const HISTORY_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub offset: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl Pager {
    pub fn new(limit: u32) -> Self {
        Self {
            offset: 0,
            limit,
            has_more: true,
        }
    }

    /// 「显示更多」应请求的偏移量
    pub fn next_offset(&self) -> u32 {
        self.offset + self.limit
    }

    /// 手动刷新：回到第一页并重新允许翻页
    pub fn reset(&mut self) {
        self.offset = 0;
        self.has_more = true;
    }

    /// 记录一次成功的页响应
    pub fn record(&mut self, offset: u32, returned: usize) {
        self.offset = offset;
        self.has_more = returned as u32 == self.limit;
    }

    /// 请求失败后停止翻页
    pub fn halt(&mut self) {
        self.has_more = false;
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(HISTORY_PAGE_SIZE)
    }
}

/// 对累积的全量列表按时间降序重排。每次合并新页之后都对整个
/// 列表排序，保证「显示更多」拼接出来的顺序全局一致，而不是
/// 各页各自有序。时间缺失的条目按 0 处理，排到最后。
pub fn sort_history_desc(rows: &mut [HistoryItem]) {
    rows.sort_by_key(|r| std::cmp::Reverse(r.created_ms.unwrap_or(0)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(ms: Option<i64>) -> HistoryItem {
        HistoryItem {
            created_ms: ms,
            ..Default::default()
        }
    }

    #[test]
    fn first_page_then_show_more_advances_by_page_size() {
        let mut pager = Pager::default();
        assert_eq!(pager.offset, 0);
        pager.record(0, 5);
        assert!(pager.has_more);
        assert_eq!(pager.next_offset(), 5);
        pager.record(5, 5);
        assert_eq!(pager.next_offset(), 10);
    }

    #[test]
    fn short_page_marks_the_end() {
        let mut pager = Pager::default();
        pager.record(0, 3);
        assert!(!pager.has_more);
    }

    #[test]
    fn reset_returns_to_first_page() {
        let mut pager = Pager::default();
        pager.record(0, 5);
        pager.record(5, 2);
        pager.reset();
        assert_eq!(pager.offset, 0);
        assert!(pager.has_more);
    }

    #[test]
    fn merged_rows_sort_globally_descending() {
        let mut rows = vec![item(Some(30)), item(Some(10)), item(None), item(Some(20))];
        sort_history_desc(&mut rows);
        let order: Vec<_> = rows.iter().map(|r| r.created_ms).collect();
        assert_eq!(order, vec![Some(30), Some(20), Some(10), None]);
    }
}
