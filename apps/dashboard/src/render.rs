use dashboard_core::{Dashboard, RowEditor, RowState, RowView, TableView};

pub async fn print_dashboard(dashboard: &Dashboard, editor: &RowEditor) {
    if let Some(error) = dashboard.error() {
        println!("! {error}");
    }
    if dashboard.is_creating().await {
        println!("(creating...)");
    }
    let table = dashboard.table(&editor.states().await).await;
    print!("{}", format_table(&table));
}

pub fn format_table(table: &TableView) -> String {
    let rows = match table {
        TableView::Loading => return "Loading...\n".to_string(),
        TableView::Empty => return "No cats yet\n".to_string(),
        TableView::Rows(rows) => rows,
    };

    let mut out = format!(
        "{:>5}  {:<24} {:>4}  {:<16} {:>10}\n",
        "ID", "Name", "YoE", "Breed", "Salary"
    );
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

fn format_row(row: &RowView) -> String {
    let marker = match row.state {
        RowState::Viewing => "",
        RowState::Editing { .. } => "  [editing]",
        RowState::Saving { .. } => "  [saving]",
    };
    format!(
        "{:>5}  {:<24} {:>4}  {:<16} {:>10}{marker}",
        row.id.0, row.name, row.years_of_experience, row.breed, row.salary
    )
}
