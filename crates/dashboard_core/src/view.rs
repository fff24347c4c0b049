use std::collections::HashMap;

use shared::domain::{format_number, CatId};

use crate::{dashboard::DashboardSnapshot, row_edit::RowState};

/// What the cats table shows for a given dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Loading,
    Empty,
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: CatId,
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    /// The draft while the row is being edited, the stored salary otherwise.
    pub salary: String,
    pub state: RowState,
}

impl TableView {
    pub fn build(snapshot: &DashboardSnapshot, rows: &HashMap<CatId, RowState>) -> Self {
        if snapshot.loading {
            return Self::Loading;
        }
        if snapshot.records.is_empty() {
            return Self::Empty;
        }
        Self::Rows(
            snapshot
                .records
                .iter()
                .map(|cat| {
                    let state = rows.get(&cat.id).cloned().unwrap_or_default();
                    RowView {
                        id: cat.id,
                        name: cat.name.clone(),
                        years_of_experience: cat.years_of_experience,
                        breed: cat.breed.clone(),
                        salary: state
                            .draft()
                            .map(str::to_string)
                            .unwrap_or_else(|| format_number(cat.salary)),
                        state,
                    }
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Cat;

    fn snapshot(loading: bool, records: Vec<Cat>) -> DashboardSnapshot {
        DashboardSnapshot {
            records,
            loading,
            pending_create: false,
            error: None,
        }
    }

    fn cat(id: i64, salary: f64) -> Cat {
        Cat {
            id: CatId(id),
            name: format!("cat-{id}"),
            years_of_experience: 2,
            breed: "Siamese".into(),
            salary,
        }
    }

    #[test]
    fn loading_wins_over_records() {
        let view = TableView::build(&snapshot(true, vec![cat(1, 10.0)]), &HashMap::new());
        assert_eq!(view, TableView::Loading);
    }

    #[test]
    fn loaded_without_records_is_empty() {
        let view = TableView::build(&snapshot(false, Vec::new()), &HashMap::new());
        assert_eq!(view, TableView::Empty);
    }

    #[test]
    fn rows_follow_replica_order_and_show_drafts() {
        let mut rows = HashMap::new();
        rows.insert(
            CatId(2),
            RowState::Editing {
                draft: "999".into(),
            },
        );
        let view = TableView::build(&snapshot(false, vec![cat(3, 30.0), cat(2, 20.0)]), &rows);
        let TableView::Rows(rows) = view else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, CatId(3));
        assert_eq!(rows[0].salary, "30");
        assert!(rows[0].state.is_viewing());
        assert_eq!(rows[1].salary, "999");
    }
}
