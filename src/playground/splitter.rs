//! Drag-to-resize geometry for the editor and output panes.

/// Heights of the two panes, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneHeights {
    /// Editor pane height in pixels.
    pub editor: f64,
    /// Output pane height in pixels.
    pub output: f64,
}

/// Container measurements at the time of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    /// Viewport width; dragging is off on narrow screens.
    pub viewport_width: f64,
    /// Offset of the container from the top of the page.
    pub top: f64,
    /// Inner height of the container.
    pub height: f64,
    /// Height of the drag bar between the panes.
    pub dragbar_height: f64,
}

/// Limits applied while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splitter {
    /// Below this viewport width the panes stack and cannot be resized.
    pub min_viewport_width: f64,
    /// Smallest editor height.
    pub min_editor_height: f64,
    /// Space always left below the editor.
    pub reserved_below_editor: f64,
    /// Smallest output height.
    pub min_output_height: f64,
    /// Share of the container given to the editor on first layout.
    pub initial_editor_share: f64,
}

impl Default for Splitter {
    fn default() -> Self {
        Self {
            min_viewport_width: 768.0,
            min_editor_height: 100.0,
            reserved_below_editor: 100.0,
            min_output_height: 50.0,
            initial_editor_share: 0.6,
        }
    }
}

impl Splitter {
    /// Whether dragging is possible at this viewport width.
    pub fn is_enabled(&self, viewport_width: f64) -> bool {
        viewport_width >= self.min_viewport_width
    }

    /// Layout applied once the page becomes interactive.
    pub fn initial(&self, container: &Container) -> PaneHeights {
        PaneHeights {
            editor: container.height * self.initial_editor_share,
            output: container.height * (1.0 - self.initial_editor_share) - container.dragbar_height,
        }
    }

    /// Heights for a pointer at `pointer_y`, or `None` if the position is
    /// out of bounds and the panes should stay as they are.
    pub fn resize(&self, container: &Container, pointer_y: f64) -> Option<PaneHeights> {
        if !self.is_enabled(container.viewport_width) {
            return None;
        }

        let editor = pointer_y - container.top;
        let max_editor = container.height - self.reserved_below_editor;
        if editor < self.min_editor_height || editor > max_editor {
            return None;
        }

        let remaining = container.height - editor - container.dragbar_height;
        Some(PaneHeights {
            editor,
            output: remaining.max(self.min_output_height),
        })
    }
}

/// Pointer state of the drag bar.
#[derive(Debug, Default)]
pub struct DragState {
    dragging: bool,
}

impl DragState {
    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Mouse down on the drag bar. Returns whether a drag started.
    pub fn begin(&mut self, splitter: &Splitter, viewport_width: f64) -> bool {
        if !splitter.is_enabled(viewport_width) {
            return false;
        }
        self.dragging = true;
        true
    }

    /// Mouse move anywhere on the page.
    pub fn update(&self, splitter: &Splitter, container: &Container, pointer_y: f64) -> Option<PaneHeights> {
        if !self.dragging {
            return None;
        }
        splitter.resize(container, pointer_y)
    }

    /// Mouse up. Returns whether a drag was in progress.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> Container {
        Container {
            viewport_width: 1280.0,
            top: 50.0,
            height: 800.0,
            dragbar_height: 10.0,
        }
    }

    #[test]
    fn test_initial_layout() {
        let heights = Splitter::default().initial(&container());
        assert!((heights.editor - 480.0).abs() < 1e-9);
        assert!((heights.output - 310.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_within_bounds() {
        let heights = Splitter::default().resize(&container(), 450.0).unwrap();
        assert_eq!(heights.editor, 400.0);
        assert_eq!(heights.output, 390.0);
    }

    #[test]
    fn test_resize_out_of_bounds_is_ignored() {
        let splitter = Splitter::default();
        assert!(splitter.resize(&container(), 120.0).is_none());
        assert!(splitter.resize(&container(), 760.0).is_none());
        assert!(splitter.resize(&container(), 750.0).is_some());
    }

    #[test]
    fn test_output_keeps_minimum_height() {
        let mut c = container();
        c.dragbar_height = 80.0;
        let heights = Splitter::default().resize(&c, 750.0).unwrap();
        assert_eq!(heights.output, 50.0);
    }

    #[test]
    fn test_drag_disabled_on_narrow_viewports() {
        let splitter = Splitter::default();
        let mut drag = DragState::default();
        assert!(!drag.begin(&splitter, 600.0));
        assert!(drag.update(&splitter, &container(), 450.0).is_none());

        assert!(drag.begin(&splitter, 1280.0));
        assert!(drag.update(&splitter, &container(), 450.0).is_some());

        let mut narrow = container();
        narrow.viewport_width = 700.0;
        assert!(drag.update(&splitter, &narrow, 450.0).is_none());

        assert!(drag.end());
        assert!(!drag.end());
    }
}
