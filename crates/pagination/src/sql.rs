//! SQLite-backed provider paging a table with `LIMIT`/`OFFSET` queries.

use std::rc::Rc;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

use crate::error::PaginationError;
use crate::provider::DataProvider;

/// Direction of the sort column.
/// 排序欄位的方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// `WHERE` predicate with positional `?` placeholders and the values bound to them.
/// 含 `?` 位置參數的 `WHERE` 條件與其綁定值。
///
/// The clause is inserted verbatim; only the values are parameterised.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFilter {
    clause: String,
    params: Vec<Value>,
}

impl SqlFilter {
    pub fn new(clause: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            clause: clause.into(),
            params,
        }
    }

    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// One result row with the column names of the query that produced it.
/// 查詢結果的一列，附帶欄位名稱。
#[derive(Debug, Clone, PartialEq)]
pub struct SqlRow {
    columns: Rc<[String]>,
    values: Vec<Value>,
}

impl SqlRow {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_by_name(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Pages through a SQLite table, honouring a sort column and an optional filter.
/// 依排序欄位與選用篩選條件分頁讀取 SQLite 資料表。
///
/// Without a sort column rows come back in `rowid` order; `rowid` is also the tie-breaker
/// for a user sort so that consecutive pages never overlap.
#[derive(Debug, Clone)]
pub struct SqlTableProvider {
    connection: Rc<Connection>,
    table: String,
    columns: Vec<String>,
    sort: Option<(String, SortOrder)>,
    filter: Option<SqlFilter>,
}

impl SqlTableProvider {
    pub fn new(connection: Rc<Connection>, table: impl Into<String>) -> Self {
        Self {
            connection,
            table: table.into(),
            columns: Vec::new(),
            sort: None,
            filter: None,
        }
    }

    /// Restricts the selected columns; an empty list selects every column.
    /// 限定查詢欄位；空清單代表全部欄位。
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.set_sort(column, order);
        self
    }

    pub fn with_filter(mut self, filter: SqlFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn connection(&self) -> &Rc<Connection> {
        &self.connection
    }

    pub fn sort(&self) -> Option<(&str, SortOrder)> {
        self.sort
            .as_ref()
            .map(|(column, order)| (column.as_str(), *order))
    }

    pub fn set_sort(&mut self, column: impl Into<String>, order: SortOrder) {
        self.sort = Some((column.into(), order));
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn filter(&self) -> Option<&SqlFilter> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: SqlFilter) {
        self.filter = Some(filter);
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    fn select_list(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|column| quote_identifier(column))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn where_clause(&self) -> String {
        match &self.filter {
            Some(filter) if !filter.clause.trim().is_empty() => {
                format!(" WHERE {}", filter.clause)
            }
            _ => String::new(),
        }
    }

    fn order_clause(&self) -> String {
        match &self.sort {
            Some((column, order)) => format!(
                " ORDER BY {} {}, rowid",
                quote_identifier(column),
                order.keyword()
            ),
            None => " ORDER BY rowid".to_string(),
        }
    }

    fn filter_params(&self) -> &[Value] {
        self.filter
            .as_ref()
            .map(|filter| filter.params.as_slice())
            .unwrap_or(&[])
    }

    fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {}{}",
            quote_identifier(&self.table),
            self.where_clause()
        )
    }

    fn page_sql(&self) -> String {
        format!(
            "SELECT {} FROM {}{}{} LIMIT ? OFFSET ?",
            self.select_list(),
            quote_identifier(&self.table),
            self.where_clause(),
            self.order_clause()
        )
    }
}

impl DataProvider for SqlTableProvider {
    type Item = SqlRow;

    fn get_total_count(&self) -> Result<usize, PaginationError> {
        let count: i64 = self.connection.query_row(
            &self.count_sql(),
            params_from_iter(self.filter_params().iter()),
            |row| row.get(0),
        )?;
        usize::try_from(count).map_err(|_| {
            PaginationError::Provider(format!("COUNT(*) returned a negative value: {count}"))
        })
    }

    fn get_page_items(
        &self,
        start_index: usize,
        count: usize,
    ) -> Result<Vec<SqlRow>, PaginationError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut params = self.filter_params().to_vec();
        params.push(Value::Integer(i64::try_from(count).unwrap_or(i64::MAX)));
        params.push(Value::Integer(i64::try_from(start_index).unwrap_or(i64::MAX)));

        let sql = self.page_sql();
        log::debug!("sql provider: {sql}");
        let mut statement = self.connection.prepare(&sql)?;
        let columns: Rc<[String]> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
            .into();
        let column_count = columns.len();

        let rows = statement.query_map(params_from_iter(params.iter()), |row| {
            (0..column_count)
                .map(|index| row.get::<_, Value>(index))
                .collect::<Result<Vec<_>, _>>()
        })?;

        let mut page = Vec::with_capacity(count.min(1024));
        for values in rows {
            page.push(SqlRow {
                columns: Rc::clone(&columns),
                values: values?,
            });
        }
        Ok(page)
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
