use super::*;
use crossterm::event::KeyModifiers;
use ratatui::style::Color;
use tempfile::TempDir;

fn entity(name: &str) -> RepoEntity {
    RepoEntity::new(name, format!("/repos/{name}"), false)
}

fn app_with(entities: Vec<RepoEntity>) -> DashApp {
    DashApp {
        entities,
        commands: CommandSet::default(),
        runner: SystemRunner,
        config_path: PathBuf::from("/tmp/repos.yaml"),
        interval: Duration::from_secs(10),
        escape_count: 0,
        log_buffer: LogBuffer::new(16),
    }
}

fn click(x: u16, y: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: x,
        row: y,
        modifiers: KeyModifiers::empty(),
    }
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

#[test]
fn cell_centers_hit_their_own_index() {
    for index in 0..9 {
        let (x, y) = layout::cell_rect(index).center();
        assert_eq!(layout::hit_test(x, y, 9), Some(index));
    }
}

#[test]
fn cell_interiors_are_pairwise_disjoint() {
    // brute-force every point across the first three grid rows
    for x in 0..80u16 {
        for y in 0..16u16 {
            let hits = (0..9)
                .filter(|&index| layout::cell_rect(index).contains(x, y))
                .count();
            assert!(hits <= 1, "point ({x},{y}) hit {hits} cells");
        }
    }
}

#[test]
fn cell_borders_never_register() {
    let rect = layout::cell_rect(0);
    assert_eq!(layout::hit_test(rect.x0, rect.y0 + 1, 1), None);
    assert_eq!(layout::hit_test(rect.x1, rect.y0 + 1, 1), None);
    assert_eq!(layout::hit_test(rect.x0 + 1, rect.y0, 1), None);
    assert_eq!(layout::hit_test(rect.x0 + 1, rect.y1, 1), None);
}

#[test]
fn grid_walks_three_columns_then_wraps() {
    assert_eq!(layout::cell_rect(0).y0, layout::cell_rect(2).y0);
    assert!(layout::cell_rect(3).y0 > layout::cell_rect(2).y0);
    assert_eq!(layout::cell_rect(0).x0, layout::cell_rect(3).x0);
}

#[test]
fn short_labels_are_centered() {
    let label = layout::label_text("abcd", false);
    assert!(label.starts_with("   abcd"));
    assert_eq!(label.trim(), "abcd");
}

#[test]
fn long_labels_truncate_with_ellipsis() {
    let label = layout::label_text("averylongrepository", false);
    assert_eq!(label, "averylo...");
    assert_eq!(label.chars().count(), layout::LABEL_WIDTH as usize);
}

#[test]
fn queued_sync_replaces_the_label() {
    assert_eq!(layout::label_text("abcd", true).trim(), "syncing...");
}

#[test]
fn color_priority_runs_red_yellow_blue_green() {
    let clean = entity("a");
    assert_eq!(draw::entity_color(&clean), Color::Green);

    let mut busy = entity("b");
    busy.pending_check = true;
    assert_eq!(draw::entity_color(&busy), Color::Blue);

    busy.has_local_changes = true;
    assert_eq!(draw::entity_color(&busy), Color::Yellow);

    busy.out_of_date = true;
    assert_eq!(draw::entity_color(&busy), Color::Red);
}

#[test]
fn click_inside_a_cell_queues_exactly_one_sync() {
    let mut app = app_with(vec![entity("alpha"), entity("beta"), entity("gamma")]);
    let (x, y) = layout::cell_rect(1).center();
    assert!(app.mark_sync_at(&click(x, y)));
    let pending: Vec<bool> = app.entities.iter().map(|e| e.pending_sync).collect();
    assert_eq!(pending, vec![false, true, false]);
}

#[test]
fn click_outside_every_cell_queues_nothing() {
    let mut app = app_with(vec![entity("alpha")]);
    let rect = layout::cell_rect(0);
    assert!(!app.mark_sync_at(&click(rect.x1 + 5, rect.y1 + 5)));
    assert!(app.entities.iter().all(|e| !e.pending_sync));
}

#[test]
fn scroll_events_are_ignored() {
    let mut app = app_with(vec![entity("alpha")]);
    let (x, y) = layout::cell_rect(0).center();
    let event = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: x,
        row: y,
        modifiers: KeyModifiers::empty(),
    };
    assert!(!app.mark_sync_at(&event));
    assert!(!app.entities[0].pending_sync);
}

#[test]
fn quit_requires_two_escapes() {
    let mut app = app_with(Vec::new());
    assert!(!app.handle_key(press(KeyCode::Esc)));
    assert!(app.handle_key(press(KeyCode::Esc)));
}

#[test]
fn other_keys_neither_quit_nor_reset_the_counter() {
    let mut app = app_with(Vec::new());
    assert!(!app.handle_key(press(KeyCode::Esc)));
    assert!(!app.handle_key(press(KeyCode::Char('x'))));
    assert!(app.handle_key(press(KeyCode::Esc)));
}

#[test]
fn reload_replaces_the_collection_from_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("repos.yaml");
    std::fs::write(&path, "repos:\n  - name: alpha\n    path: /repos/alpha\n").unwrap();

    let mut app = app_with(vec![entity("stale"), entity("leftover")]);
    app.config_path = path;
    assert!(!app.handle_key(press(KeyCode::Char('r'))));

    // reload runs a full pass; the seeded check degrades to clean because
    // the default status command cannot spawn in the test environment
    assert_eq!(app.entities.len(), 1);
    assert_eq!(app.entities[0].name, "alpha");
    assert!(!app.entities[0].pending_check);
}

#[test]
fn reload_with_a_broken_file_renders_empty() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("repos.yaml");
    std::fs::write(&path, "repos: {not a list}").unwrap();

    let mut app = app_with(vec![entity("stale")]);
    app.config_path = path;
    app.handle_key(press(KeyCode::Char('r')));
    assert!(app.entities.is_empty());
}

#[test]
fn full_pass_marks_then_clears_every_check() {
    let mut app = app_with(vec![entity("alpha"), entity("beta")]);
    app.mark_all_checks();
    assert!(app.entities.iter().all(|e| e.pending_check));
    app.run_pass();
    assert!(app.entities.iter().all(|e| e.idle()));
}
