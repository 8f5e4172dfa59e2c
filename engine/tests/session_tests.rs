//! Session Tests - Pointer Routing, Modes, Persistence Hooks
//!
//! Drives a BuilderSession the way a host would: pointer events carrying
//! camera rays, per-frame updates and editor actions.

use std::time::{Duration, Instant};

use block_forge_engine::game::builder::{BuilderSession, ClearBehavior, GestureOutcome, InteractionMode};
use block_forge_engine::game::building::ColorTheme;
use block_forge_engine::game::config::EditorConfig;
use block_forge_engine::game::input::EditorAction;
use block_forge_engine::game::persistence::{
    FileLocalCache, LocalCache, MemoryCreationStore, MemoryLocalCache, NoticeLevel, StoreWorker,
};
use block_forge_engine::input::{PointerDevice, PointerEvent, PointerPhase, Position};
use block_forge_engine::physics::Ray;
use glam::Vec3;

// ============================================================================
// Helpers
// ============================================================================

fn new_session() -> BuilderSession {
    BuilderSession::new(EditorConfig::default(), Box::new(MemoryLocalCache::new()))
}

fn ray_at(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 25.0, z), Vec3::NEG_Y)
}

fn pointer(phase: PointerPhase, screen: (f32, f32), device: PointerDevice, x: f32, z: f32) -> PointerEvent {
    PointerEvent::new(phase, Position::from(screen), device, ray_at(x, z))
}

fn tap(session: &mut BuilderSession, x: f32, z: f32, now: Instant) -> GestureOutcome {
    session.handle_pointer(&pointer(PointerPhase::Down, (50.0, 50.0), PointerDevice::Touch, x, z), now);
    session.handle_pointer(&pointer(PointerPhase::Up, (52.0, 51.0), PointerDevice::Touch, x, z), now)
}

fn wait_for_store(session: &mut BuilderSession, now: Instant) {
    let event = session
        .store()
        .expect("store attached")
        .recv_timeout(Duration::from_secs(5))
        .expect("worker alive")
        .expect("store answered");
    session.handle_store_event(event, now);
}

// ============================================================================
// Pointer Routing
// ============================================================================

#[test]
fn test_drag_orbits_instead_of_placing() {
    let mut session = new_session();
    let now = Instant::now();

    session.handle_pointer(&pointer(PointerPhase::Down, (0.0, 0.0), PointerDevice::Touch, 0.0, 0.0), now);
    session.handle_pointer(&pointer(PointerPhase::Move, (40.0, 0.0), PointerDevice::Touch, 0.0, 0.0), now);
    let outcome =
        session.handle_pointer(&pointer(PointerPhase::Up, (40.0, 0.0), PointerDevice::Touch, 0.0, 0.0), now);

    assert_eq!(outcome, GestureOutcome::NoEdit);
    assert!(session.construction().is_empty());
}

#[test]
fn test_pointer_leave_ends_the_session() {
    let mut session = new_session();
    let now = Instant::now();

    session.handle_pointer(&pointer(PointerPhase::Down, (0.0, 0.0), PointerDevice::Mouse, 2.0, 2.0), now);
    let outcome =
        session.handle_pointer(&pointer(PointerPhase::Leave, (1.0, 1.0), PointerDevice::Mouse, 2.0, 2.0), now);
    assert_eq!(outcome, GestureOutcome::Place);
    assert_eq!(session.construction().len(), 1);
}

#[test]
fn test_invalid_preview_is_not_committed() {
    let mut session = new_session();
    let now = Instant::now();

    // 4 wide at x=9 covers cells 7..11, past the platform edge
    session.apply_action(EditorAction::AdjustWidth { delta: 2 }, now);
    assert_eq!(tap(&mut session, 9.0, 0.0, now), GestureOutcome::NoEdit);
    let preview = session.render_view().preview.expect("preview shown");
    assert!(!preview.valid);
    assert!(session.construction().is_empty());
}

#[test]
fn test_move_mode_is_camera_only() {
    let mut session = new_session();
    let now = Instant::now();
    session.apply_action(EditorAction::SetMode { mode: InteractionMode::Move }, now);

    assert_eq!(tap(&mut session, 0.0, 0.0, now), GestureOutcome::NoEdit);
    let view = session.render_view();
    assert!(view.camera_controls_enabled);
    assert!(view.preview.is_none());
}

#[test]
fn test_build_then_erase_then_undo() {
    let mut session = new_session();
    let now = Instant::now();
    tap(&mut session, 0.0, 0.0, now);
    tap(&mut session, 0.0, 0.0, now);
    assert_eq!(session.construction().len(), 2);

    session.apply_action(EditorAction::SetMode { mode: InteractionMode::Erase }, now);
    // Looking straight down picks the top brick
    assert_eq!(tap(&mut session, 0.0, 0.0, now), GestureOutcome::Erase(1));
    assert_eq!(session.construction().len(), 1);

    session.apply_action(EditorAction::Undo, now);
    assert_eq!(session.construction().len(), 2);
    assert!(session.render_view().can_redo);
}

#[test]
fn test_undo_mid_gesture_drops_erase_target() {
    let mut session = new_session();
    let now = Instant::now();
    tap(&mut session, 0.0, 0.0, now);
    tap(&mut session, 5.0, 5.0, now);
    tap(&mut session, -5.0, -5.0, now);

    session.apply_action(EditorAction::SetMode { mode: InteractionMode::Erase }, now);
    assert_eq!(tap(&mut session, 0.0, 0.0, now), GestureOutcome::Erase(0));

    // Target is index 1 of [B, C]; after undo, index 1 would be B
    session.handle_pointer(&pointer(PointerPhase::Down, (0.0, 0.0), PointerDevice::Touch, -5.0, -5.0), now);
    session.apply_action(EditorAction::Undo, now);
    let outcome =
        session.handle_pointer(&pointer(PointerPhase::Up, (0.0, 0.0), PointerDevice::Touch, -5.0, -5.0), now);

    assert_eq!(outcome, GestureOutcome::NoEdit);
    assert_eq!(session.construction().len(), 3);
}

#[test]
fn test_mode_switch_cancels_gesture() {
    let mut session = new_session();
    let now = Instant::now();
    session.handle_pointer(&pointer(PointerPhase::Down, (0.0, 0.0), PointerDevice::Touch, 0.0, 0.0), now);
    session.apply_action(EditorAction::SetMode { mode: InteractionMode::Erase }, now);
    session.apply_action(EditorAction::SetMode { mode: InteractionMode::Build }, now);

    let outcome =
        session.handle_pointer(&pointer(PointerPhase::Up, (0.0, 0.0), PointerDevice::Touch, 0.0, 0.0), now);
    assert_eq!(outcome, GestureOutcome::NoEdit);
}

#[test]
fn test_dimension_actions_update_preview() {
    let mut session = new_session();
    let now = Instant::now();
    session.update_frame(Some(&ray_at(1.37, 1.37)), now);
    assert_eq!(session.preview().expect("preview").position.x, 1.0);

    session.apply_action(EditorAction::AdjustWidth { delta: 1 }, now);
    session.apply_action(EditorAction::SwapDimensions, now);
    assert_eq!((session.dimensions().width, session.dimensions().depth), (2, 3));
    let preview = session.preview().expect("preview");
    assert_eq!((preview.position.x, preview.position.z), (1.0, 0.5));
}

// ============================================================================
// Clear
// ============================================================================

#[test]
fn test_clear_resets_history_and_forgets_creation() {
    let cache = MemoryLocalCache::with_raw(
        r##"{"blocks":[{"color":"#FF3333","position":[0,0.75,0],"width":2,"depth":2}],"creationId":"abcdefghij","creationName":"Hut"}"##,
    );
    let mut session = BuilderSession::new(EditorConfig::default(), Box::new(cache));
    assert!(session.restore_from_cache());
    assert_eq!(session.creation_name(), Some("Hut"));

    session.apply_action(EditorAction::Clear, Instant::now());
    assert!(session.construction().is_empty());
    assert!(!session.history().can_undo());
    assert_eq!(session.creation_id(), None);
    assert!(session.local_cache().load().is_none());
}

#[test]
fn test_undoable_clear_flag() {
    let config = EditorConfig {
        clear_behavior: ClearBehavior::Undoable,
        ..Default::default()
    };
    let mut session = BuilderSession::new(config, Box::new(MemoryLocalCache::new()));
    let now = Instant::now();
    tap(&mut session, 0.0, 0.0, now);

    session.apply_action(EditorAction::Clear, now);
    assert!(session.construction().is_empty());
    session.apply_action(EditorAction::Undo, now);
    assert_eq!(session.construction().len(), 1);
}

// ============================================================================
// Local Cache
// ============================================================================

#[test]
fn test_autosave_round_trip_through_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("editor_state.json");
    let start = Instant::now();

    {
        let mut session = BuilderSession::new(EditorConfig::default(), Box::new(FileLocalCache::new(&path)));
        tap(&mut session, 0.0, 0.0, start);
        tap(&mut session, 4.0, -4.0, start + Duration::from_millis(200));
        session.apply_action(EditorAction::CycleTheme, start + Duration::from_millis(300));

        // Each change restarts the 500 ms countdown
        session.update_frame(None, start + Duration::from_millis(700));
        assert!(!path.exists());
        session.update_frame(None, start + Duration::from_millis(800));
        assert!(path.exists());
    }

    let mut restored = BuilderSession::new(EditorConfig::default(), Box::new(FileLocalCache::new(&path)));
    assert!(restored.restore_from_cache());
    assert_eq!(restored.construction().len(), 2);
    assert_eq!(restored.theme(), ColorTheme::Muted);
    assert!(!restored.history().can_undo());
    // Restoring alone schedules nothing
    assert!(!restored.autosave_pending());
}

#[test]
fn test_empty_or_malformed_cache_is_not_restored() {
    let mut empty = BuilderSession::new(
        EditorConfig::default(),
        Box::new(MemoryLocalCache::with_raw(r#"{"blocks": [], "width": 5}"#)),
    );
    assert!(!empty.restore_from_cache());
    assert_eq!(empty.dimensions().width, 2);

    let mut broken = BuilderSession::new(EditorConfig::default(), Box::new(MemoryLocalCache::with_raw("not json")));
    assert!(!broken.restore_from_cache());
    assert!(broken.construction().is_empty());
}

#[test]
fn test_cache_with_oversized_brick_is_not_restored() {
    let raw = r##"{"blocks":[{"color":"#FF3333","position":[0,0.75,0],"width":4294967295,"depth":0}]}"##;
    let mut session = BuilderSession::new(EditorConfig::default(), Box::new(MemoryLocalCache::with_raw(raw)));
    assert!(!session.restore_from_cache());

    session.update_frame(Some(&ray_at(0.0, 0.0)), Instant::now());
    assert!(session.construction().is_empty());
    assert!(session.preview().expect("preview").valid);
}

#[test]
fn test_failed_autosave_keeps_local_state() {
    let mut session = BuilderSession::new(EditorConfig::default(), Box::new(MemoryLocalCache::unavailable()));
    let now = Instant::now();
    tap(&mut session, 0.0, 0.0, now);

    // Unavailable cache: nothing is scheduled, nothing is lost
    assert!(!session.autosave_pending());
    session.update_frame(None, now + Duration::from_secs(1));
    assert_eq!(session.construction().len(), 1);
}

// ============================================================================
// Creation Store
// ============================================================================

#[test]
fn test_save_update_and_load_creation() {
    let worker = StoreWorker::spawn(MemoryCreationStore::new()).expect("spawn");
    let mut session = new_session().with_store(worker);
    let now = Instant::now();
    assert!(session.store_available());

    tap(&mut session, 0.0, 0.0, now);
    session.apply_action(EditorAction::Save { name: Some("Tower".to_string()) }, now);
    wait_for_store(&mut session, now);

    let id = session.creation_id().expect("saved").to_string();
    assert_eq!(session.creation_name(), Some("Tower"));
    let notices = session.drain_notices();
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Creation saved successfully!");

    // Second save updates the same creation
    tap(&mut session, 5.0, 5.0, now);
    session.apply_action(EditorAction::Save { name: None }, now);
    wait_for_store(&mut session, now);
    assert_eq!(session.drain_notices()[0].message, "Creation updated successfully!");
    assert_eq!(session.creation_id(), Some(id.as_str()));

    session.apply_action(EditorAction::Clear, now);
    assert!(session.construction().is_empty());
    assert_eq!(session.creation_id(), None);

    session.apply_action(EditorAction::Load { id: id.clone() }, now);
    wait_for_store(&mut session, now);
    assert_eq!(session.construction().len(), 2);
    assert_eq!(session.creation_id(), Some(id.as_str()));
    assert!(!session.history().can_undo());
}

#[test]
fn test_list_and_delete_creations() {
    let worker = StoreWorker::spawn(MemoryCreationStore::new()).expect("spawn");
    let mut session = new_session().with_store(worker);
    let now = Instant::now();

    tap(&mut session, 0.0, 0.0, now);
    session.apply_action(EditorAction::Save { name: Some("One".to_string()) }, now);
    wait_for_store(&mut session, now);
    let id = session.creation_id().expect("saved").to_string();

    session.apply_action(EditorAction::ListCreations { limit: None, offset: 0 }, now);
    wait_for_store(&mut session, now);
    assert_eq!(session.listed_creations().len(), 1);
    assert_eq!(session.listed_creations()[0].name, "One");

    session.apply_action(EditorAction::DeleteCreation { id }, now);
    wait_for_store(&mut session, now);
    assert!(session.listed_creations().is_empty());
}

#[test]
fn test_failed_load_reports_and_keeps_construction() {
    let worker = StoreWorker::spawn(MemoryCreationStore::new()).expect("spawn");
    let mut session = new_session().with_store(worker);
    let now = Instant::now();
    tap(&mut session, 0.0, 0.0, now);

    session.apply_action(EditorAction::Load { id: "missing123".to_string() }, now);
    wait_for_store(&mut session, now);

    let notices = session.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Creation not found.");
    assert_eq!(session.construction().len(), 1);
}

#[test]
fn test_save_requires_a_name() {
    let worker = StoreWorker::spawn(MemoryCreationStore::new()).expect("spawn");
    let mut session = new_session().with_store(worker);
    session.apply_action(EditorAction::Save { name: Some("   ".to_string()) }, Instant::now());

    let notices = session.drain_notices();
    assert_eq!(notices[0].message, "Please enter a name for your creation");
}
