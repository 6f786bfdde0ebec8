use super::model::{ColumnType, Table};

/// Metadata for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: ColumnType,
    pub non_null: usize,
    pub null: usize,
}

/// One [`ColumnInfo`] per table column, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSummary {
    pub columns: Vec<ColumnInfo>,
}

impl ColumnSummary {
    pub fn get(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Per-column type and present/missing counts.
pub fn summarize(table: &Table) -> ColumnSummary {
    let columns = table
        .columns()
        .iter()
        .map(|col| {
            let (non_null, null) = col.counts();
            ColumnInfo {
                name: col.name().to_string(),
                dtype: col.dtype(),
                non_null,
                null,
            }
        })
        .collect();
    ColumnSummary { columns }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    #[test]
    fn reports_types_and_null_counts() {
        let table = load_bytes(b"name,age\nAlice,30\nBob,\nCarol,30").unwrap();
        let summary = summarize(&table);
        assert_eq!(
            summary.get("age"),
            Some(&ColumnInfo {
                name: "age".into(),
                dtype: ColumnType::Integer,
                non_null: 2,
                null: 1,
            })
        );
        assert_eq!(summary.get("name").map(|c| c.dtype), Some(ColumnType::Text));
    }

    #[test]
    fn counts_always_sum_to_row_count() {
        let csv = b"a,b,c,d\n1,,x,\n,2.5,,\n3,1,y\n,,,\n";
        let table = load_bytes(csv).unwrap();
        let summary = summarize(&table);
        assert_eq!(summary.columns.len(), table.n_cols());
        for info in &summary.columns {
            assert_eq!(info.non_null + info.null, table.n_rows(), "{}", info.name);
        }
        assert_eq!(summary.get("d").map(|c| c.null), Some(4));
    }

    #[test]
    fn order_follows_table() {
        let table = load_bytes(b"z,a,m\n1,2,3\n").unwrap();
        let summary = summarize(&table);
        let names: Vec<&str> = summary.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}
