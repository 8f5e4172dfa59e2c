//! Builder Session
//!
//! Owns the live construction (through its history) and everything that
//! edits it: the mode controller, the gesture tracker, the build preview and
//! the persistence hooks. The host feeds it pointer events, per-frame rays
//! and [`EditorAction`]s, and reads back a [`RenderView`].
//!
//! All methods run to completion on the caller's thread. Store round trips
//! go through a [`StoreWorker`] and come back as events drained in
//! [`BuilderSession::update_frame`].

use std::time::Instant;

use glam::Vec3;

use super::gesture::{GestureOutcome, GestureTracker};
use super::history::{ConstructionHistory, HistoryError};
use super::mode::{InteractionMode, InteractionPolicy, ModeController};
use super::placement::{PlacementResult, resolve_placement};
use super::raycast::{build_surface_hit, pick_block};
use super::tools::BrickDimensions;
use crate::game::building::{Block, ColorTheme, Construction, PALETTE_SIZE};
use crate::game::config::EditorConfig;
use crate::game::input::EditorAction;
use crate::game::persistence::{
    AutosaveDebouncer, CachedState, Creation, LocalCache, Notice, PersistenceError, StoreCommand, StoreEvent,
    StoreOp, StoreWorker,
};
use crate::input::{PointerDevice, PointerEvent, PointerPhase};
use crate::physics::Ray;

/// The brick that would be placed by a tap right now.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewBrick {
    pub position: Vec3,
    pub width: u32,
    pub depth: u32,
    pub color: String,
    /// Drawn as a rejection indicator when `false`
    pub valid: bool,
}

/// Read-only snapshot for the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView<'a> {
    pub blocks: &'a [Block],
    pub preview: Option<PreviewBrick>,
    /// Brick drawn with the erase highlight
    pub highlighted: Option<usize>,
    pub mode: InteractionMode,
    pub camera_controls_enabled: bool,
    /// Play mode: camera auto-rotates, editing is off
    pub auto_rotate: bool,
    pub theme: ColorTheme,
    pub can_undo: bool,
    pub can_redo: bool,
}

pub struct BuilderSession {
    config: EditorConfig,
    history: ConstructionHistory,
    modes: ModeController,
    gesture: GestureTracker,
    dimensions: BrickDimensions,
    selected_color: String,
    theme: ColorTheme,
    /// Last build-surface hit, kept so the preview can be re-resolved after edits
    surface_hit: Option<Vec3>,
    preview: Option<PlacementResult>,
    preview_visible: bool,
    playing: bool,
    /// Device of the most recent pointer event
    device: PointerDevice,
    creation_id: Option<String>,
    creation_name: Option<String>,
    autosave: AutosaveDebouncer,
    cache: Box<dyn LocalCache>,
    cache_available: bool,
    store: Option<StoreWorker>,
    listed: Vec<Creation>,
    notices: Vec<Notice>,
}

impl BuilderSession {
    pub fn new(config: EditorConfig, cache: Box<dyn LocalCache>) -> Self {
        let history = ConstructionHistory::new()
            .with_clear_behavior(config.clear_behavior)
            .with_limit(config.history_limit);
        let cache_available = cache.is_available();
        if !cache_available {
            log::warn!("[Builder] Local cache unavailable; autosave disabled");
        }

        Self {
            history,
            modes: ModeController::default(),
            gesture: GestureTracker::new(config.tap_threshold_px),
            dimensions: BrickDimensions::new(config.default_width, config.default_depth),
            selected_color: config.default_color.clone(),
            theme: ColorTheme::default(),
            surface_hit: None,
            preview: None,
            preview_visible: true,
            playing: false,
            device: PointerDevice::default(),
            creation_id: None,
            creation_name: None,
            autosave: AutosaveDebouncer::new(config.autosave_delay()),
            cache,
            cache_available,
            store: None,
            listed: Vec::new(),
            notices: Vec::new(),
            config,
        }
    }

    /// Attach a creation store worker.
    pub fn with_store(mut self, store: StoreWorker) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &ConstructionHistory {
        &self.history
    }

    pub fn construction(&self) -> &Construction {
        self.history.current()
    }

    pub fn mode(&self) -> InteractionMode {
        self.modes.mode()
    }

    pub fn policy(&self) -> InteractionPolicy {
        self.modes.policy()
    }

    pub fn dimensions(&self) -> BrickDimensions {
        self.dimensions
    }

    pub fn selected_color(&self) -> &str {
        &self.selected_color
    }

    pub fn theme(&self) -> ColorTheme {
        self.theme
    }

    pub fn preview(&self) -> Option<PlacementResult> {
        self.preview
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn hovered(&self) -> Option<usize> {
        self.modes.hovered()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn creation_id(&self) -> Option<&str> {
        self.creation_id.as_deref()
    }

    pub fn creation_name(&self) -> Option<&str> {
        self.creation_name.as_deref()
    }

    /// Whether save/load can be offered at all.
    pub fn store_available(&self) -> bool {
        self.store.as_ref().is_some_and(StoreWorker::is_available)
    }

    /// The attached store worker, if any.
    pub fn store(&self) -> Option<&StoreWorker> {
        self.store.as_ref()
    }

    /// Result of the most recent creation listing.
    pub fn listed_creations(&self) -> &[Creation] {
        &self.listed
    }

    pub fn local_cache(&self) -> &dyn LocalCache {
        self.cache.as_ref()
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Take all notices raised since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Restore the editor from the local cache.
    ///
    /// Only a cached state with at least one brick is restored. History
    /// restarts from it, and restoring does not schedule an autosave.
    pub fn restore_from_cache(&mut self) -> bool {
        if !self.cache_available {
            return false;
        }
        let Some(state) = self.cache.load() else {
            return false;
        };
        if state.blocks.is_empty() {
            return false;
        }

        log::info!("[Builder] Restored {} bricks from local cache", state.blocks.len());
        self.history.reset_to(Construction::from_blocks(state.blocks));
        self.dimensions = BrickDimensions::new(state.width, state.depth);
        self.selected_color = state.selected_color;
        self.theme = state.theme;
        self.creation_id = state.creation_id;
        self.creation_name = state.creation_name;
        self.refresh_preview();
        true
    }

    /// Route one pointer event. Returns the edit it produced, if any.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) -> GestureOutcome {
        if self.playing {
            return GestureOutcome::NoEdit;
        }

        self.device = event.device;
        let policy = self.modes.policy();
        if policy.consumes_preview_ray() {
            self.trace_preview(&event.ray);
        }

        let grid = &self.config.grid;
        let construction = self.history.current();
        let ray = event.ray;
        let pick = || pick_block(grid, &ray, construction).map(|hit| hit.index);

        match event.phase {
            PointerPhase::Down => {
                self.gesture.pointer_down(event.position, event.device, policy, pick);
                GestureOutcome::NoEdit
            }
            PointerPhase::Move => {
                if let Some(hovered) = self.gesture.pointer_move(event.position, event.device, policy, pick) {
                    self.modes.set_hovered(hovered);
                }
                GestureOutcome::NoEdit
            }
            PointerPhase::Up | PointerPhase::Leave => {
                let ready = self.preview_ready();
                let outcome = self.gesture.pointer_up(policy, ready);
                self.apply_gesture(outcome, now);
                outcome
            }
        }
    }

    fn apply_gesture(&mut self, outcome: GestureOutcome, now: Instant) {
        match outcome {
            GestureOutcome::NoEdit => {}
            GestureOutcome::Place => {
                if let Some(preview) = self.preview {
                    let block = Block::new(
                        self.selected_color.clone(),
                        preview.position,
                        self.dimensions.width,
                        self.dimensions.depth,
                    );
                    self.add_block(block, now);
                }
            }
            GestureOutcome::Erase(index) => {
                if let Err(e) = self.delete_block(index, now) {
                    log::warn!("[Builder] Erase ignored: {}", e);
                }
            }
        }
    }

    fn preview_ready(&self) -> bool {
        self.preview_visible && self.preview.is_some_and(|p| p.valid)
    }

    /// Per-frame update with the current pointer ray, if the pointer is over
    /// the surface.
    ///
    /// Resolves the build preview, refreshes the desktop erase highlight,
    /// applies store responses and writes the local cache when due.
    pub fn update_frame(&mut self, ray: Option<&Ray>, now: Instant) {
        if !self.playing {
            if let Some(ray) = ray {
                let policy = self.modes.policy();
                if policy.consumes_preview_ray() {
                    self.trace_preview(ray);
                } else if policy.picks_on_demand() && self.device.supports_hover() && !self.gesture.is_active() {
                    let hovered = pick_block(&self.config.grid, ray, self.history.current()).map(|hit| hit.index);
                    self.modes.set_hovered(hovered);
                }
            }
        }

        self.drain_store_events(now);

        if self.autosave.poll(now) {
            self.write_cache();
        }
    }

    fn trace_preview(&mut self, ray: &Ray) {
        if let Some(hit) = build_surface_hit(&self.config.grid, ray) {
            self.surface_hit = Some(hit);
            self.refresh_preview();
        }
    }

    /// Re-resolve the preview at the last surface hit against the current
    /// construction and brick size.
    fn refresh_preview(&mut self) {
        self.preview = self.surface_hit.map(|hit| {
            resolve_placement(
                &self.config.grid,
                hit,
                self.dimensions.width,
                self.dimensions.depth,
                self.history.current(),
            )
        });
    }

    /// Append a brick. Placement legality is the caller's concern; pointer
    /// taps only get here with a valid preview.
    pub fn add_block(&mut self, block: Block, now: Instant) {
        log::info!(
            "[Builder] Placed {}x{} brick at ({:.1}, {:.3}, {:.1})",
            block.width,
            block.depth,
            block.position.x,
            block.position.y,
            block.position.z
        );
        self.history.add_block(block);
        self.after_edit(now);
    }

    pub fn delete_block(&mut self, index: usize, now: Instant) -> Result<(), HistoryError> {
        self.history.delete_block(index)?;
        log::info!("[Builder] Removed brick {}", index);
        self.after_edit(now);
        Ok(())
    }

    /// Move an existing brick. The new position is taken as given.
    pub fn relocate_block(&mut self, index: usize, position: Vec3, now: Instant) -> Result<(), HistoryError> {
        self.history.update_block_position(index, position)?;
        self.after_edit(now);
        Ok(())
    }

    pub fn undo(&mut self, now: Instant) -> bool {
        let changed = self.history.undo();
        if changed {
            self.after_edit(now);
        }
        changed
    }

    pub fn redo(&mut self, now: Instant) -> bool {
        let changed = self.history.redo();
        if changed {
            self.after_edit(now);
        }
        changed
    }

    /// Remove every brick and forget the current creation and the cached
    /// state. Does nothing when the construction is already empty.
    pub fn clear(&mut self) -> bool {
        if self.history.current().is_empty() {
            return false;
        }

        self.history.clear();
        self.creation_id = None;
        self.creation_name = None;
        self.autosave.cancel();
        if let Err(e) = self.cache.clear() {
            log::warn!("[Builder] Failed to clear local cache: {}", e);
            self.notices.push(Notice::error("Failed to clear saved state."));
        }
        self.modes.clear_hover();
        self.refresh_preview();
        log::info!("[Builder] Cleared construction");
        true
    }

    fn after_edit(&mut self, now: Instant) {
        // Indices may have shifted; a pending erase target is stale
        self.gesture.cancel();
        self.modes.clear_hover();
        self.refresh_preview();
        self.mark_dirty(now);
    }

    fn mark_dirty(&mut self, now: Instant) {
        if self.cache_available {
            self.autosave.mark_dirty(now);
        }
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.modes.set_mode(mode) {
            self.gesture.cancel();
        }
    }

    pub fn apply_action(&mut self, action: EditorAction, now: Instant) {
        if self.playing && !action.allowed_while_playing() {
            log::debug!("[Builder] Ignoring {:?} while playing", action);
            return;
        }

        match action {
            EditorAction::SetMode { mode } => self.set_mode(mode),
            EditorAction::AdjustWidth { delta } => {
                self.dimensions.adjust_width(delta);
                self.after_tool_change(now);
            }
            EditorAction::AdjustDepth { delta } => {
                self.dimensions.adjust_depth(delta);
                self.after_tool_change(now);
            }
            EditorAction::SwapDimensions => {
                self.dimensions.swap();
                self.after_tool_change(now);
            }
            EditorAction::SelectColor { slot } => {
                let color = slot
                    .checked_sub(1)
                    .filter(|s| *s < PALETTE_SIZE)
                    .and_then(|s| self.theme.color(s));
                match color {
                    Some(color) => {
                        self.selected_color = color.to_string();
                        self.mark_dirty(now);
                    }
                    None => log::warn!("[Builder] No palette slot {}", slot),
                }
            }
            EditorAction::CycleTheme => {
                self.theme = self.theme.next();
                self.selected_color = self.theme.remap(&self.selected_color).to_string();
                self.mark_dirty(now);
            }
            EditorAction::Undo => {
                self.undo(now);
            }
            EditorAction::Redo => {
                self.redo(now);
            }
            EditorAction::Save { name } => self.save_creation(name),
            EditorAction::Load { id } => self.send_store(StoreCommand::Load { id }),
            EditorAction::ListCreations { limit, offset } => self.send_store(StoreCommand::List {
                limit: limit.unwrap_or(self.config.list_page_size),
                offset,
            }),
            EditorAction::DeleteCreation { id } => self.send_store(StoreCommand::Delete { id }),
            EditorAction::Clear => {
                self.clear();
            }
            EditorAction::TogglePlay => {
                self.playing = !self.playing;
                self.gesture.cancel();
                self.modes.clear_hover();
                log::info!("[Builder] Play mode {}", if self.playing { "on" } else { "off" });
            }
            EditorAction::TogglePreview => {
                self.preview_visible = !self.preview_visible;
            }
        }
    }

    fn after_tool_change(&mut self, now: Instant) {
        self.refresh_preview();
        self.mark_dirty(now);
    }

    /// Save the construction: updates the current creation when one is
    /// loaded, otherwise saves a new one under `name`.
    fn save_creation(&mut self, name: Option<String>) {
        let blocks = self.history.current().blocks().to_vec();
        let command = match (&self.creation_id, name) {
            (Some(id), name) => {
                let name = name
                    .filter(|n| !n.trim().is_empty())
                    .or_else(|| self.creation_name.clone())
                    .unwrap_or_default();
                StoreCommand::Update {
                    id: id.clone(),
                    name,
                    blocks,
                }
            }
            (None, Some(name)) if !name.trim().is_empty() => StoreCommand::Save { name, blocks },
            (None, _) => {
                self.notices.push(Notice::error("Please enter a name for your creation"));
                return;
            }
        };
        self.send_store(command);
    }

    fn send_store(&mut self, command: StoreCommand) {
        let sent = match self.store.as_ref() {
            Some(store) if store.is_available() => store.send(command),
            _ => {
                self.notices.push(Notice::info("Creation storage is not configured."));
                return;
            }
        };
        if !sent {
            log::error!("[Builder] Store worker stopped");
            self.notices.push(Notice::error("Creation storage stopped responding."));
        }
    }

    fn drain_store_events(&mut self, now: Instant) {
        let mut events = Vec::new();
        if let Some(store) = self.store.as_ref() {
            while let Some(event) = store.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            self.handle_store_event(event, now);
        }
    }

    /// Apply a store response. Local state is never rolled back on failure.
    pub fn handle_store_event(&mut self, event: StoreEvent, now: Instant) {
        match event {
            StoreEvent::Saved { id, name } => {
                self.creation_id = Some(id);
                self.creation_name = Some(name);
                self.notices.push(Notice::success("Creation saved successfully!"));
                self.mark_dirty(now);
            }
            StoreEvent::Updated { id, name } => {
                if self.creation_id.as_deref() == Some(id.as_str()) {
                    self.creation_name = Some(name);
                }
                self.notices.push(Notice::success("Creation updated successfully!"));
                self.mark_dirty(now);
            }
            StoreEvent::Loaded(creation) => self.load_creation(creation, now),
            StoreEvent::Listed(creations) => {
                self.listed = creations;
            }
            StoreEvent::Deleted { id } => {
                self.listed.retain(|c| c.id != id);
                self.notices.push(Notice::success("Creation deleted successfully!"));
            }
            StoreEvent::Failed { op, error } => {
                self.notices.push(Notice::error(failure_message(op, &error)));
            }
        }
    }

    /// Replace the construction with a stored creation. History restarts
    /// from it.
    pub fn load_creation(&mut self, creation: Creation, now: Instant) {
        log::info!(
            "[Builder] Loaded creation '{}' ({} bricks)",
            creation.name,
            creation.blocks.len()
        );
        self.history.reset_to(Construction::from_blocks(creation.blocks));
        self.creation_id = Some(creation.id);
        self.creation_name = Some(creation.name);
        self.gesture.cancel();
        self.after_edit(now);
    }

    pub fn cached_state(&self) -> CachedState {
        CachedState {
            blocks: self.history.current().blocks().to_vec(),
            width: self.dimensions.width,
            depth: self.dimensions.depth,
            selected_color: self.selected_color.clone(),
            theme: self.theme,
            creation_id: self.creation_id.clone(),
            creation_name: self.creation_name.clone(),
        }
    }

    /// Write the cache now instead of waiting for the debounce.
    pub fn flush_autosave(&mut self) {
        if self.autosave.is_pending() {
            self.autosave.cancel();
            self.write_cache();
        }
    }

    fn write_cache(&mut self) {
        let state = self.cached_state();
        match self.cache.save(&state) {
            Ok(()) => log::debug!("[Builder] Autosaved {} bricks", state.blocks.len()),
            Err(e) => {
                log::warn!("[Builder] Autosave failed: {}", e);
                self.notices.push(Notice::error("Failed to save to local storage."));
            }
        }
    }

    pub fn render_view(&self) -> RenderView<'_> {
        let policy = self.modes.policy();
        let preview = self
            .preview
            .filter(|_| policy.consumes_preview_ray() && self.preview_visible && !self.playing)
            .map(|p| PreviewBrick {
                position: p.position,
                width: self.dimensions.width,
                depth: self.dimensions.depth,
                color: self.selected_color.clone(),
                valid: p.valid,
            });

        RenderView {
            blocks: self.history.current().blocks(),
            preview,
            highlighted: self.modes.hovered().filter(|_| policy.picks_on_demand()),
            mode: policy.mode(),
            camera_controls_enabled: policy.camera_controls_enabled() && !self.playing,
            auto_rotate: self.playing,
            theme: self.theme,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}

fn failure_message(op: StoreOp, error: &PersistenceError) -> String {
    let not_found = matches!(error, PersistenceError::NotFound(_));
    match op {
        StoreOp::Save => "Failed to save creation.".to_string(),
        StoreOp::Update if not_found => "Creation not found.".to_string(),
        StoreOp::Update => "Failed to update creation.".to_string(),
        StoreOp::Load if not_found => "Creation not found.".to_string(),
        StoreOp::Load => "Failed to get creation.".to_string(),
        StoreOp::List => format!("Failed to get creations: {error}"),
        StoreOp::Delete => "Failed to delete creation.".to_string(),
    }
}
