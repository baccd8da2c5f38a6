use std::path::PathBuf;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use priorities_core::config::{AppConfig, CONFIG_FILE_NAME};
use priorities_core::db::{Database, LibSqlKeyValueRepository};
use priorities_core::layout::{pack_rows, RowKind, StickyConfig, StickyStack};
use priorities_core::priorities::PrioritiesStore;
use priorities_core::timeline::group_by_month;
use priorities_core::UserId;

use crate::commands::common::{format_user_line, load_fixtures, resolve_db_path, resolve_user};
use crate::commands::config::run_config_init;
use crate::commands::grid::{format_grid_lines, grid_views};
use crate::commands::layout::format_sticky_lines;
use crate::commands::priorities::{add_priority, remove_priority};
use crate::commands::timeline::format_timeline_lines;
use crate::error::CliError;

#[test]
fn resolve_user_accepts_numeric_and_unique_ids() {
    let fixtures = load_fixtures().unwrap();
    assert_eq!(resolve_user(&fixtures, "4").unwrap().unique_user_id, "u-omar");
    assert_eq!(resolve_user(&fixtures, " u-omar ").unwrap().id, UserId::new(4));
}

#[test]
fn resolve_user_rejects_blank_and_unknown() {
    let fixtures = load_fixtures().unwrap();
    assert!(matches!(
        resolve_user(&fixtures, "   "),
        Err(CliError::EmptyUserId)
    ));
    assert!(matches!(
        resolve_user(&fixtures, "u-nobody"),
        Err(CliError::UserNotFound(id)) if id == "u-nobody"
    ));
}

#[test]
fn explicit_db_path_wins() {
    let path = PathBuf::from("/tmp/priorities-test.db");
    assert_eq!(resolve_db_path(Some(path.clone())).unwrap(), path);
}

#[test]
fn user_line_shows_age_and_birthday_countdown() {
    let fixtures = load_fixtures().unwrap();
    let omar = resolve_user(&fixtures, "u-omar").unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
    assert_eq!(
        format_user_line(omar, today),
        "  4  u-omar    Omar Haddad · Best friend  (35, birthday tomorrow)"
    );
}

#[test]
fn grid_rows_follow_the_row_rhythm() {
    let fixtures = load_fixtures().unwrap();
    let rows = pack_rows(fixtures.users.len(), 390.0, &AppConfig::default().grid);
    let views = grid_views(&rows, &fixtures.users);

    let kinds: Vec<_> = views.iter().map(|row| row.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RowKind::Single,
            RowKind::Double,
            RowKind::Triple,
            RowKind::Triple,
            RowKind::Double,
            RowKind::Single,
        ]
    );
    assert_eq!(views[0].cells[0].name, "Ava");
    assert_eq!(views[1].cells[1].name, "Maya");

    let lines = format_grid_lines(&views);
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("row  0  single"));
}

#[test]
fn timeline_lines_nest_days_in_months() {
    let fixtures = load_fixtures().unwrap();
    let months = group_by_month(fixtures.timeline_for("u-omar"));
    assert_eq!(
        format_timeline_lines(&months),
        vec![
            "October 2026 (1)",
            "  Saturday, October 10",
            "    13:20  me    Return the tent",
            "July 2026 (1)",
            "  Saturday, July 11",
            "    20:15  them  Video",
        ]
    );
}

#[test]
fn sticky_lines_cover_every_card() {
    let stack = StickyStack::new(3, StickyConfig::default());
    let lines = format_sticky_lines(&stack.transforms(0.0));
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("card 0  translate      0.0  scale 1.000"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_and_remove_priorities_persist() {
    let fixtures = load_fixtures().unwrap();
    let db = Database::open_in_memory().await.unwrap();
    let repo = LibSqlKeyValueRepository::new(db.connection());

    assert_eq!(
        add_priority(&repo, &fixtures, "u-maya").await.unwrap(),
        "Added Maya Ortiz (1 total)"
    );
    assert_eq!(
        add_priority(&repo, &fixtures, "3").await.unwrap(),
        "Maya Ortiz is already a priority"
    );
    add_priority(&repo, &fixtures, "1").await.unwrap();

    let store = PrioritiesStore::load(&repo, &fixtures).await.unwrap();
    assert_eq!(store.ids(), vec![UserId::new(3), UserId::new(1)]);

    assert_eq!(
        remove_priority(&repo, &fixtures, "u-maya").await.unwrap(),
        "Removed Maya Ortiz (1 left)"
    );
    assert!(matches!(
        remove_priority(&repo, &fixtures, "u-maya").await,
        Err(CliError::NotAPriority(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_accepts_ids_missing_from_fixtures() {
    let fixtures = load_fixtures().unwrap();
    let db = Database::open_in_memory().await.unwrap();
    let repo = LibSqlKeyValueRepository::new(db.connection());

    let mut retired = fixtures.users[0].clone();
    retired.id = UserId::new(999);
    retired.name = "Retired Contact".to_string();
    let kept = fixtures.user(UserId::new(2)).unwrap().clone();
    PrioritiesStore::new(vec![kept, retired]).save(&repo).await.unwrap();

    assert_eq!(
        remove_priority(&repo, &fixtures, "999").await.unwrap(),
        "Removed Retired Contact (1 left)"
    );
    let store = PrioritiesStore::load(&repo, &fixtures).await.unwrap();
    assert_eq!(store.ids(), vec![UserId::new(2)]);

    assert!(matches!(
        remove_priority(&repo, &fixtures, "999").await,
        Err(CliError::NotAPriority(_))
    ));
    assert!(matches!(
        remove_priority(&repo, &fixtures, "u-nobody").await,
        Err(CliError::UserNotFound(_))
    ));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE_NAME);

    run_config_init(&path, false).unwrap();
    assert!(matches!(
        run_config_init(&path, false),
        Err(CliError::ConfigExists(_))
    ));
    run_config_init(&path, true).unwrap();
    assert_eq!(AppConfig::load_from_path(&path), AppConfig::default());
}
