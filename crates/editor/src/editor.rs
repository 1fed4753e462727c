use plume_surface::{
    CommandError, Document, FormattingContext, Node, NodeTracker, SelectionAdapter, Surface,
    TreeSelectionAdapter, cleanup, exec_command,
};
use plume_toolbar::{Reconciler, Toolbar, ToolbarControl};

use crate::config::EditorConfig;
use crate::events::RawEvent;
use crate::timers::{TimerPurpose, TimerQueue};

/// The editor widget: owns one surface and one toolbar and keeps them in
/// sync. Input events and timer ticks are injected by the embedding host;
/// everything runs on the host's single event loop.
pub struct Editor {
    surface: Surface,
    toolbar: Toolbar,
    tracker: NodeTracker,
    reconciler: Reconciler,
    adapter: Box<dyn SelectionAdapter>,
    config: EditorConfig,
    timers: TimerQueue,

    ready: bool,
    ready_polls: u32,

    breadcrumb: Vec<String>,
    last_path_write: Option<u64>,
    pending_context: Option<FormattingContext>,
    last_context: Option<FormattingContext>,
}

impl Editor {
    pub fn new(surface: Surface, toolbar: Toolbar, config: EditorConfig, now: u64) -> Self {
        Self::with_parts(
            surface,
            toolbar,
            NodeTracker::standard(),
            Reconciler::standard(),
            Box::new(TreeSelectionAdapter),
            config,
            now,
        )
    }

    pub fn with_parts(
        surface: Surface,
        toolbar: Toolbar,
        tracker: NodeTracker,
        reconciler: Reconciler,
        adapter: Box<dyn SelectionAdapter>,
        config: EditorConfig,
        now: u64,
    ) -> Self {
        let config = config.with_defaults();
        let mut editor = Self {
            surface,
            toolbar,
            tracker,
            reconciler,
            adapter,
            config,
            timers: TimerQueue::new(),
            ready: false,
            ready_polls: 0,
            breadcrumb: Vec::new(),
            last_path_write: None,
            pending_context: None,
            last_context: None,
        };
        editor.timers.schedule(
            TimerPurpose::ReadyPoll,
            now + editor.config.ready_poll_interval,
        );
        editor
    }

    pub fn standard(now: u64) -> Self {
        let doc = Document {
            children: vec![Node::paragraph("")],
        };
        Self::new(Surface::new(doc), Toolbar::standard(), EditorConfig::default(), now)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The last formatting context the tracker derived, if any.
    pub fn context(&self) -> Option<&FormattingContext> {
        self.last_context.as_ref()
    }

    /// The visible ancestor path, root first. Written on a debounced
    /// schedule, unlike control reconciliation which is immediate.
    pub fn breadcrumb(&self) -> &[String] {
        &self.breadcrumb
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn handle_event(&mut self, event: RawEvent, now: u64) {
        if !self.ready {
            log::trace!("dropping {event:?}: editor not ready");
            return;
        }
        if event.triggers_node_change() {
            self.node_change_inner(false, now, None);
        }
    }

    /// Re-derives the formatting context and reconciles the toolbar. `force`
    /// bypasses the breadcrumb debounce, for programmatic context resets.
    pub fn node_change(&mut self, force: bool, now: u64) {
        self.node_change_inner(force, now, None);
    }

    /// Applies a formatting action and immediately re-derives, with the
    /// acting control exempt from the reconciler's reset.
    pub fn exec_command(
        &mut self,
        action: &str,
        value: Option<&str>,
        now: u64,
    ) -> Result<(), CommandError> {
        exec_command(&mut self.surface, action, value)?;
        self.node_change_inner(true, now, Some(action));
        Ok(())
    }

    pub fn get_button_by_value(&self, command: &str) -> Option<&ToolbarControl> {
        self.toolbar.get_button_by_value(command)
    }

    // Direct control mutation, bypassing the reconciler. Initialization only;
    // the next node change owns these states again.

    pub fn enable_button(&mut self, command: &str) -> bool {
        self.toolbar.enable_button(command)
    }

    pub fn disable_button(&mut self, command: &str) -> bool {
        self.toolbar.disable_button(command)
    }

    pub fn select_button(&mut self, command: &str) -> bool {
        self.toolbar.select_button(command)
    }

    pub fn deselect_button(&mut self, command: &str) -> bool {
        self.toolbar.deselect_button(command)
    }

    /// Fires every timer whose deadline has passed. The host calls this from
    /// its event loop whenever its clock advances.
    pub fn run_due(&mut self, now: u64) -> Vec<TimerPurpose> {
        let fired = self.timers.run_due(now);
        for purpose in &fired {
            match purpose {
                TimerPurpose::Cleanup => {
                    let edits = cleanup(self.surface.doc_mut());
                    if edits > 0 {
                        self.surface.normalize_selection();
                        log::debug!("cleanup pass performed {edits} edits");
                    }
                }
                TimerPurpose::PathWrite => {
                    if let Some(context) = self.pending_context.take() {
                        self.write_breadcrumb(context.path, now);
                    }
                }
                TimerPurpose::ReadyPoll => self.poll_content_ready(now),
            }
        }
        fired
    }

    fn poll_content_ready(&mut self, now: u64) {
        if self.surface.content_ready() {
            self.ready = true;
            log::debug!("content ready after {} polls", self.ready_polls);
            self.node_change_inner(true, now, None);
            return;
        }

        self.ready_polls += 1;
        if self.ready_polls < self.config.ready_poll_retries {
            self.timers.schedule(
                TimerPurpose::ReadyPoll,
                now + self.config.ready_poll_interval,
            );
        } else {
            // Abandon quietly; a well-formed host always initializes.
            log::debug!(
                "content never became ready; giving up after {} polls",
                self.ready_polls
            );
        }
    }

    fn node_change_inner(&mut self, force: bool, now: u64, triggering: Option<&str>) {
        let selection = self.adapter.current(&self.surface);
        let context = self.tracker.derive(&self.surface, selection.as_ref());

        let writes = self
            .reconciler
            .reconcile(&mut self.toolbar, &context, triggering);
        log::debug!("node change at tick {now}: {writes} control writes");

        self.timers.schedule(TimerPurpose::Cleanup, now);

        let elapsed = match self.last_path_write {
            None => true,
            Some(prev) => now.saturating_sub(prev) >= self.config.node_change_threshold,
        };
        if force || elapsed {
            self.timers.cancel(TimerPurpose::PathWrite);
            self.pending_context = None;
            self.write_breadcrumb(context.path.clone(), now);
        } else {
            let due = self.last_path_write.unwrap_or(now) + self.config.node_change_threshold;
            self.timers.schedule(TimerPurpose::PathWrite, due);
            self.pending_context = Some(context.clone());
        }

        self.last_context = Some(context);
    }

    fn write_breadcrumb(&mut self, path: Vec<String>, now: u64) {
        self.breadcrumb = path;
        self.last_path_write = Some(now);
    }
}
