use super::*;
use launcher_protocols::LaunchMode;
use launcher_store::MemorySyncStore;
use serde_json::json;

fn coord(x: u8, y: u8) -> ZoneCoordinate {
    ZoneCoordinate::new(x, y).unwrap()
}

async fn app_with(value: serde_json::Value) -> (LauncherApp, Arc<MemorySyncStore>) {
    let items = value.as_object().cloned().unwrap_or_default();
    let store = Arc::new(MemorySyncStore::with_items(items));
    let app = LauncherApp::open(store.clone(), LaunchContext::new_tab()).await.unwrap();
    (app, store)
}

async fn empty_app() -> (LauncherApp, Arc<MemorySyncStore>) {
    app_with(json!({})).await
}

fn id_at(app: &LauncherApp, zone: ZoneCoordinate, index: usize) -> EntryId {
    app.registry().zone(zone).unwrap().hotkeys[index].id
}

async fn three_entries() -> (LauncherApp, Arc<MemorySyncStore>) {
    app_with(json!({
        "zones": {
            "0-0": {
                "name": "Default",
                "hotkeys": [
                    { "key": "A", "url": "https://a" },
                    { "key": "B", "url": "https://b" },
                    { "key": "C", "url": "https://c" }
                ]
            }
        }
    }))
    .await
}

// ============================================================================
// Editing
// ============================================================================

#[tokio::test]
async fn test_add_enters_edit_mode() {
    let (mut app, store) = empty_app().await;
    let id = app.add_entry(ZoneCoordinate::ORIGIN).await.unwrap().unwrap();

    assert_eq!(app.mode(), UiMode::EditingEntry(id));
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_add_rejected_by_store_leaves_no_entry() {
    let store = Arc::new(MemorySyncStore::new().with_item_quota(8));
    let mut app = LauncherApp::open(store.clone(), LaunchContext::new_tab()).await.unwrap();

    assert!(app.add_entry(ZoneCoordinate::ORIGIN).await.is_err());
    assert!(app.mode().is_idle());
    assert!(app.registry().zone(ZoneCoordinate::ORIGIN).unwrap().hotkeys.is_empty());
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_add_to_missing_zone() {
    let (mut app, _) = empty_app().await;
    assert!(app.add_entry(coord(2, 2)).await.unwrap().is_none());
    assert!(app.mode().is_idle());
}

#[tokio::test]
async fn test_capture_binds_and_persists() {
    let (mut app, store) = empty_app().await;
    let id = app.add_entry(ZoneCoordinate::ORIGIN).await.unwrap().unwrap();

    let outcome = app.handle_key(&KeyPress::new("g", true)).await.unwrap();
    assert_eq!(outcome, KeyOutcome::Captured("Shift+G".to_string()));
    assert_eq!(app.registry().entry_by_id(id).unwrap().key, "Shift+G");
    assert_eq!(store.write_count(), 2);

    // still editing, the next key overwrites
    let outcome = app.handle_key(&KeyPress::new(" ", false)).await.unwrap();
    assert_eq!(outcome, KeyOutcome::Captured("Space".to_string()));
    assert_eq!(app.mode(), UiMode::EditingEntry(id));
}

#[tokio::test]
async fn test_capture_ignores_lone_shift() {
    let (mut app, store) = empty_app().await;
    let id = app.add_entry(ZoneCoordinate::ORIGIN).await.unwrap().unwrap();

    let outcome = app.handle_key(&KeyPress::new("Shift", true)).await.unwrap();
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(app.registry().entry_by_id(id).unwrap().key, "");
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_capture_terminators_end_editing() {
    let (mut app, _) = empty_app().await;
    for terminator in ["Tab", "Escape"] {
        let id = app.add_entry(ZoneCoordinate::ORIGIN).await.unwrap().unwrap();
        let outcome = app.handle_key(&KeyPress::new(terminator, false)).await.unwrap();
        assert_eq!(outcome, KeyOutcome::CaptureEnded);
        assert!(app.mode().is_idle());
        assert_eq!(app.registry().entry_by_id(id).unwrap().key, "");
    }
}

#[tokio::test]
async fn test_commit_field_persists() {
    let (mut app, store) = three_entries().await;
    let id = id_at(&app, ZoneCoordinate::ORIGIN, 1);

    assert!(app.commit_field(id, EntryField::Url, "https://bee").await.unwrap());
    assert_eq!(store.write_count(), 1);
    let snapshot = store.snapshot().await;
    assert_eq!(snapshot["zones"]["0-0"]["hotkeys"][1]["url"], "https://bee");
}

#[tokio::test]
async fn test_focus_follows_entry_after_removal_above() {
    let (mut app, _) = three_entries().await;
    let editing = id_at(&app, ZoneCoordinate::ORIGIN, 2);
    let middle = id_at(&app, ZoneCoordinate::ORIGIN, 1);

    assert!(app.begin_edit(editing));
    app.delete_entry(middle).await.unwrap();

    assert_eq!(app.mode(), UiMode::EditingEntry(editing));
    assert_eq!(app.registry().position_of(editing), Some((ZoneCoordinate::ORIGIN, 1)));

    app.handle_key(&KeyPress::new("z", false)).await.unwrap();
    let origin = app.registry().zone(ZoneCoordinate::ORIGIN).unwrap();
    assert_eq!(origin.hotkeys[1].key, "Z");
    assert_eq!(origin.hotkeys[0].key, "A");
}

#[tokio::test]
async fn test_removing_focused_entry_returns_to_idle() {
    let (mut app, _) = three_entries().await;
    let id = id_at(&app, ZoneCoordinate::ORIGIN, 0);

    app.begin_edit(id);
    assert!(app.delete_entry(id).await.unwrap().is_some());
    assert!(app.mode().is_idle());
}

// ============================================================================
// Delete confirmation
// ============================================================================

#[tokio::test]
async fn test_delete_needs_two_presses() {
    let (mut app, store) = three_entries().await;
    let id = id_at(&app, ZoneCoordinate::ORIGIN, 0);

    assert_eq!(app.request_delete(id).await.unwrap(), DeleteOutcome::Armed);
    assert_eq!(app.mode(), UiMode::ConfirmingDelete(id));
    assert_eq!(store.write_count(), 0);

    assert_eq!(app.request_delete(id).await.unwrap(), DeleteOutcome::Deleted);
    assert!(app.mode().is_idle());
    assert_eq!(app.registry().zone(ZoneCoordinate::ORIGIN).unwrap().hotkeys.len(), 2);
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_other_action_dismisses_confirmation() {
    let (mut app, _) = three_entries().await;
    let first = id_at(&app, ZoneCoordinate::ORIGIN, 0);

    app.request_delete(first).await.unwrap();
    app.begin_rename(ZoneCoordinate::ORIGIN);
    assert_eq!(app.mode(), UiMode::EditingZoneName(ZoneCoordinate::ORIGIN));

    // a fresh press arms again instead of deleting
    app.cancel_rename();
    assert_eq!(app.request_delete(first).await.unwrap(), DeleteOutcome::Armed);
}

#[tokio::test]
async fn test_arming_another_entry_moves_confirmation() {
    let (mut app, _) = three_entries().await;
    let first = id_at(&app, ZoneCoordinate::ORIGIN, 0);
    let second = id_at(&app, ZoneCoordinate::ORIGIN, 1);

    app.request_delete(first).await.unwrap();
    assert_eq!(app.request_delete(second).await.unwrap(), DeleteOutcome::Armed);
    assert_eq!(app.mode(), UiMode::ConfirmingDelete(second));
    assert_eq!(app.registry().zone(ZoneCoordinate::ORIGIN).unwrap().hotkeys.len(), 3);
}

#[tokio::test]
async fn test_delete_missing_entry() {
    let (mut app, _) = three_entries().await;
    assert_eq!(app.request_delete(EntryId::new()).await.unwrap(), DeleteOutcome::Missing);
}

// ============================================================================
// Zone rename
// ============================================================================

#[tokio::test]
async fn test_rename_commit_and_cancel() {
    let (mut app, store) = empty_app().await;

    assert!(app.begin_rename(ZoneCoordinate::ORIGIN));
    assert!(app.commit_rename("Work").await.unwrap());
    assert!(app.mode().is_idle());
    assert_eq!(app.registry().zone(ZoneCoordinate::ORIGIN).unwrap().name, "Work");

    app.begin_rename(ZoneCoordinate::ORIGIN);
    app.cancel_rename();
    assert!(!app.commit_rename("Ignored").await.unwrap());
    assert_eq!(app.registry().zone(ZoneCoordinate::ORIGIN).unwrap().name, "Work");
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_rename_missing_zone() {
    let (mut app, _) = empty_app().await;
    assert!(!app.begin_rename(coord(1, 1)));
    assert!(app.mode().is_idle());
}

#[tokio::test]
async fn test_keys_ignored_while_renaming() {
    let (mut app, _) = three_entries().await;
    app.begin_rename(ZoneCoordinate::ORIGIN);
    assert_eq!(app.handle_key(&KeyPress::new("a", false)).await.unwrap(), KeyOutcome::Ignored);
}

// ============================================================================
// Drag and drop
// ============================================================================

#[tokio::test]
async fn test_drop_on_entry_reorders() {
    let (mut app, _) = three_entries().await;
    let first = id_at(&app, ZoneCoordinate::ORIGIN, 0);
    let last = id_at(&app, ZoneCoordinate::ORIGIN, 2);

    assert!(app.begin_drag(first));
    assert!(app.drop_on_entry(last).await.unwrap());
    assert!(app.mode().is_idle());

    let keys: Vec<_> = app.registry().zone(ZoneCoordinate::ORIGIN).unwrap()
        .hotkeys.iter().map(|h| h.key.as_str()).collect();
    assert_eq!(keys, vec!["B", "C", "A"]);
}

#[tokio::test]
async fn test_drop_on_self_is_noop() {
    let (mut app, store) = three_entries().await;
    let first = id_at(&app, ZoneCoordinate::ORIGIN, 0);

    app.begin_drag(first);
    assert!(!app.drop_on_entry(first).await.unwrap());
    assert!(app.mode().is_idle());
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_drop_on_zone_body() {
    let (mut app, _) = three_entries().await;
    app.activate_zone(coord(1, 0)).await.unwrap();
    let second = id_at(&app, ZoneCoordinate::ORIGIN, 1);

    // own zone: nothing
    app.begin_drag(second);
    assert!(!app.drop_on_zone(ZoneCoordinate::ORIGIN).await.unwrap());

    app.begin_drag(second);
    assert!(app.drop_on_zone(coord(1, 0)).await.unwrap());
    assert_eq!(app.registry().position_of(second), Some((coord(1, 0), 0)));
    assert_eq!(app.registry().zone(ZoneCoordinate::ORIGIN).unwrap().hotkeys.len(), 2);
}

#[tokio::test]
async fn test_drop_without_drag() {
    let (mut app, _) = three_entries().await;
    let first = id_at(&app, ZoneCoordinate::ORIGIN, 0);
    assert!(!app.drop_on_entry(first).await.unwrap());
    assert!(!app.drop_on_zone(ZoneCoordinate::ORIGIN).await.unwrap());
}

#[tokio::test]
async fn test_end_drag() {
    let (mut app, _) = three_entries().await;
    app.begin_drag(id_at(&app, ZoneCoordinate::ORIGIN, 0));
    app.end_drag();
    assert!(app.mode().is_idle());
}

// ============================================================================
// Zones
// ============================================================================

#[tokio::test]
async fn test_delete_zone_clears_focus_inside() {
    let (mut app, _) = empty_app().await;
    app.activate_zone(coord(1, 0)).await.unwrap();
    let id = app.add_entry(coord(1, 0)).await.unwrap().unwrap();
    assert_eq!(app.mode(), UiMode::EditingEntry(id));

    assert!(app.delete_zone(coord(1, 0)).await.unwrap());
    assert!(app.mode().is_idle());
    assert!(!app.registry().contains(coord(1, 0)));
}

#[tokio::test]
async fn test_delete_zone_keeps_focus_elsewhere() {
    let (mut app, _) = three_entries().await;
    app.activate_zone(coord(0, 1)).await.unwrap();
    let id = id_at(&app, ZoneCoordinate::ORIGIN, 0);
    app.begin_edit(id);

    assert!(app.delete_zone(coord(0, 1)).await.unwrap());
    assert_eq!(app.mode(), UiMode::EditingEntry(id));
}

#[tokio::test]
async fn test_topology_rejections() {
    let (mut app, store) = empty_app().await;
    assert!(!app.activate_zone(coord(1, 1)).await.unwrap());
    assert!(!app.delete_zone(ZoneCoordinate::ORIGIN).await.unwrap());
    assert_eq!(store.write_count(), 0);
}

// ============================================================================
// Live keypress
// ============================================================================

#[tokio::test]
async fn test_live_key_dispatches() {
    let (mut app, _) = app_with(json!({
        "zones": {
            "0-0": { "name": "", "hotkeys": [{ "key": "G", "url": "" }] },
            "1-0": { "name": "", "hotkeys": [{ "key": "G", "url": "https://gmail", "matchKeyword": "https://mail" }] }
        }
    }))
    .await;

    let outcome = app.handle_key(&KeyPress::new("g", false)).await.unwrap();
    let KeyOutcome::Dispatch(RuntimeMessage::NavigateOrSwitch { url, match_keyword, mode, prev_url }) = outcome else {
        panic!("expected dispatch, got {:?}", outcome);
    };
    assert_eq!(url, "https://gmail");
    assert_eq!(match_keyword, "https://mail");
    assert_eq!(mode, LaunchMode::New);
    assert_eq!(prev_url, "");
}

#[tokio::test]
async fn test_live_key_uses_launch_context() {
    let store = Arc::new(MemorySyncStore::with_items(
        json!({ "hotkeys": [{ "key": "A", "url": "https://a" }] }).as_object().cloned().unwrap(),
    ));
    let mut app = LauncherApp::open(store, LaunchContext::current_tab("https://prev"))
        .await
        .unwrap();

    let outcome = app.handle_key(&KeyPress::new("a", false)).await.unwrap();
    assert_eq!(
        outcome,
        KeyOutcome::Dispatch(RuntimeMessage::NavigateOrSwitch {
            url: "https://a".to_string(),
            match_keyword: String::new(),
            mode: LaunchMode::Current,
            prev_url: "https://prev".to_string(),
        })
    );
}

#[tokio::test]
async fn test_live_key_dismisses_confirmation() {
    let (mut app, _) = three_entries().await;
    let first = id_at(&app, ZoneCoordinate::ORIGIN, 0);

    app.request_delete(first).await.unwrap();
    let outcome = app.handle_key(&KeyPress::new("b", false)).await.unwrap();
    assert!(matches!(outcome, KeyOutcome::Dispatch(_)));
    assert!(app.mode().is_idle());

    assert_eq!(app.request_delete(first).await.unwrap(), DeleteOutcome::Armed);
    assert_eq!(app.registry().zone(ZoneCoordinate::ORIGIN).unwrap().hotkeys.len(), 3);
}

#[tokio::test]
async fn test_live_key_unbound() {
    let (mut app, _) = three_entries().await;
    assert_eq!(app.handle_key(&KeyPress::new("q", false)).await.unwrap(), KeyOutcome::Unbound);
    assert_eq!(app.handle_key(&KeyPress::new("a", true)).await.unwrap(), KeyOutcome::Unbound);
}

#[tokio::test]
async fn test_layout_tracks_zones() {
    let (mut app, _) = empty_app().await;
    assert_eq!(app.layout().width(), 2);
    app.activate_zone(coord(1, 0)).await.unwrap();
    assert_eq!(app.layout().width(), 3);
}
