use std::path::Path;

use priorities_core::config::AppConfig;
use priorities_core::db::LibSqlKeyValueRepository;
use priorities_core::layout::{pack_rows, ItemFrame, RowData, RowKind};
use priorities_core::priorities::PrioritiesStore;
use priorities_core::User;
use serde::Serialize;

use crate::commands::common::{load_fixtures, open_database};
use crate::error::CliError;

#[derive(Debug, Serialize, PartialEq)]
pub struct GridRowView {
    pub index: usize,
    pub kind: RowKind,
    pub y: f32,
    pub height: f32,
    pub cells: Vec<GridCellView>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GridCellView {
    pub user_id: u64,
    pub name: String,
    pub frame: ItemFrame,
}

pub async fn run_grid(
    width: f32,
    use_priorities: bool,
    as_json: bool,
    db_path: &Path,
    config: &AppConfig,
) -> Result<(), CliError> {
    if width <= 0.0 {
        return Err(CliError::InvalidWidth(width));
    }

    let fixtures = load_fixtures()?;
    let users = if use_priorities {
        let db = open_database(db_path).await?;
        let repo = LibSqlKeyValueRepository::new(db.connection());
        PrioritiesStore::load(&repo, &fixtures)
            .await?
            .users()
            .to_vec()
    } else {
        fixtures.users
    };

    let rows = pack_rows(users.len(), width, &config.grid);
    let views = grid_views(&rows, &users);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        for line in format_grid_lines(&views) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn grid_views(rows: &[RowData], users: &[User]) -> Vec<GridRowView> {
    rows.iter()
        .map(|row| GridRowView {
            index: row.index,
            kind: row.kind,
            y: row.y,
            height: row.height,
            cells: row
                .slice(users)
                .iter()
                .zip(&row.items)
                .map(|(user, frame)| GridCellView {
                    user_id: user.id.get(),
                    name: user.first_name().to_string(),
                    frame: *frame,
                })
                .collect(),
        })
        .collect()
}

pub fn format_grid_lines(rows: &[GridRowView]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let cells = row
                .cells
                .iter()
                .map(|cell| format!("{} {:.0}x{:.0}", cell.name, cell.frame.width, cell.frame.height))
                .collect::<Vec<_>>()
                .join(" | ");
            format!(
                "row {:>2}  {:<6}  y={:>7.1}  {cells}",
                row.index,
                kind_label(row.kind),
                row.y
            )
        })
        .collect()
}

const fn kind_label(kind: RowKind) -> &'static str {
    match kind {
        RowKind::Single => "single",
        RowKind::Double => "double",
        RowKind::Triple => "triple",
    }
}
