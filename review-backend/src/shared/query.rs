// src/shared/query.rs
//
// 全リソース共通の一覧クエリ表現。ハンドラーがページ番号・件数・
// フィルタ・ソートをここに詰め、リポジトリ側で一度だけSQLに変換する。

use sea_orm::{Order, Value};

/// デフォルトページサイズ
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// 過大なページサイズを防止する上限
pub const MAX_PAGE_SIZE: u64 = 100;

/// フィルタ演算子。ハンドラーが生成するのは Eq のみだが、
/// 変換層としては比較・部分一致も受け付ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Contains,
}

/// (カラム, 演算子, 値) のフィルタ三つ組
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// 空文字の値は「フィルタ指定なし」として扱う
    pub fn is_empty_value(&self) -> bool {
        match &self.value {
            Value::String(None) => true,
            Value::String(Some(s)) => s.is_empty(),
            _ => false,
        }
    }
}

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// (カラム, 方向) のソート指定
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// 一覧取得の共通パラメータ。
/// フィルタとソートは挿入順を保持したままSQLに反映される。
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: u64,
    pub limit: u64,
    pub filters: Vec<Filter>,
    pub order_by: Vec<OrderBy>,
}

impl ListParams {
    pub fn new(page: u64, limit: u64) -> Self {
        let page = page.max(1);
        let limit = if limit == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE)
        };

        Self {
            page,
            limit,
            filters: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// オフセットを計算
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    pub fn filter(mut self, column: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn filter_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, SortDirection::Desc)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}
