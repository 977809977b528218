//! In-memory numeric table keyed by instance id.

/// A row-major table of nullable numbers.
///
/// `index` holds one instance id per row and `columns` one name per cell.
/// `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl Table {
    pub fn new(index: Vec<String>, columns: Vec<String>, rows: Vec<Vec<Option<f64>>>) -> Self {
        debug_assert_eq!(index.len(), rows.len());
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self {
            index,
            columns,
            rows,
        }
    }

    /// Build a table from dense rows with no missing values.
    pub fn from_values(index: Vec<String>, columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Some).collect())
            .collect();
        Self::new(index, columns, rows)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Same index and columns, every row passed through `f`.
    pub fn map_rows<F>(&self, mut f: F) -> Table
    where
        F: FnMut(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        Table {
            index: self.index.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().map(|r| f(r.as_slice())).collect(),
        }
    }

    /// Concatenate `other` to the right of `self`, aligned on `self.index`.
    ///
    /// Rows of `other` whose id is missing from `self` are dropped; ids of
    /// `self` missing from `other` get all-missing cells.
    pub fn concat_columns(&self, other: &Table) -> Table {
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());

        let same_index = self.index == other.index;
        let rows = self
            .index
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let mut row = self.rows[i].clone();
                let right = if same_index {
                    Some(&other.rows[i])
                } else {
                    other
                        .index
                        .iter()
                        .position(|o| o == id)
                        .map(|j| &other.rows[j])
                };
                match right {
                    Some(r) => row.extend(r.iter().copied()),
                    None => row.extend(std::iter::repeat_n(None, other.num_columns())),
                }
                row
            })
            .collect();

        Table::new(self.index.clone(), columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_concat_same_index() {
        let x = Table::from_values(ids(&["i1", "i2"]), ids(&["f"]), vec![vec![1.0], vec![2.0]]);
        let y = Table::from_values(
            ids(&["i1", "i2"]),
            ids(&["a", "b"]),
            vec![vec![3.0, 4.0], vec![5.0, 6.0]],
        );
        let xy = x.concat_columns(&y);
        assert_eq!(xy.columns, ids(&["f", "a", "b"]));
        assert_eq!(xy.rows[1], vec![Some(2.0), Some(5.0), Some(6.0)]);
    }

    #[test]
    fn test_concat_aligns_on_left_index() {
        let x = Table::from_values(ids(&["i1", "i2"]), ids(&["f"]), vec![vec![1.0], vec![2.0]]);
        let y = Table::from_values(
            ids(&["i3", "i1"]),
            ids(&["a"]),
            vec![vec![9.0], vec![7.0]],
        );
        let xy = x.concat_columns(&y);
        assert_eq!(xy.index, ids(&["i1", "i2"]));
        assert_eq!(xy.rows[0], vec![Some(1.0), Some(7.0)]);
        assert_eq!(xy.rows[1], vec![Some(2.0), None]);
    }

    #[test]
    fn test_map_rows_keeps_shape() {
        let t = Table::from_values(ids(&["i1"]), ids(&["a", "b"]), vec![vec![1.0, 2.0]]);
        let doubled = t.map_rows(|r| r.iter().map(|v| v.map(|x| x * 2.0)).collect());
        assert_eq!(doubled.columns, t.columns);
        assert_eq!(doubled.rows[0], vec![Some(2.0), Some(4.0)]);
    }
}
