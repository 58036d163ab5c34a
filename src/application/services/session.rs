//! Interactive treemap session
//!
//! Holds a tree, the viewport it is drawn into and the currently selected
//! leaf, and turns input events (clicks, key presses) into calls against the
//! tree. Rendering is left to the caller: `frame()` returns the tiles to draw
//! and `status_line()` the text to show beneath them.

use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::layout::Tile;
use crate::domain::{
    DomainError, LeafHit, Point, Rect, TreeArena, DEFAULT_STEP_PERCENT,
};

/// The leaf the user last clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub node: Index,
    pub path: String,
    pub size: u64,
}

impl From<LeafHit> for Selection {
    fn from(hit: LeafHit) -> Self {
        Self {
            node: hit.node,
            path: hit.path,
            size: hit.size,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.path, self.size)
    }
}

/// One input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Left click: toggle selection
    Select(Point),
    /// Right click: delete the leaf under the point
    Delete(Point),
    /// Up key
    Grow,
    /// Down key
    Shrink,
    /// Redraw request
    Frame,
    Quit,
}

impl FromStr for SessionEvent {
    type Err = ApplicationError;

    /// Parses `click X Y`, `delete X Y`, `grow`, `shrink`, `frame` or `quit`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let point = |args: &[&str]| -> ApplicationResult<Point> {
            match args {
                [x, y] => {
                    let x = x.parse().map_err(|_| ApplicationError::InvalidEvent(line.to_string()))?;
                    let y = y.parse().map_err(|_| ApplicationError::InvalidEvent(line.to_string()))?;
                    Ok(Point::new(x, y))
                }
                _ => Err(ApplicationError::InvalidEvent(line.to_string())),
            }
        };
        match words.as_slice() {
            ["click", args @ ..] | ["select", args @ ..] => Ok(SessionEvent::Select(point(args)?)),
            ["delete", args @ ..] => Ok(SessionEvent::Delete(point(args)?)),
            ["grow"] | ["up"] => Ok(SessionEvent::Grow),
            ["shrink"] | ["down"] => Ok(SessionEvent::Shrink),
            ["frame"] => Ok(SessionEvent::Frame),
            ["quit"] | ["exit"] => Ok(SessionEvent::Quit),
            _ => Err(ApplicationError::InvalidEvent(line.to_string())),
        }
    }
}

/// What an event did, for the caller to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Selection changed (None: cleared)
    Selected(Option<Selection>),
    /// Leaf removed; the selection is cleared
    Deleted(Option<Selection>),
    /// Selected leaf has a new size
    Resized(Option<Selection>),
    Frame(Vec<Tile>),
    Quit,
}

/// A tree being explored in a fixed viewport.
#[derive(Debug)]
pub struct TreemapSession {
    tree: TreeArena,
    viewport: Rect,
    selected: Option<Selection>,
}

impl TreemapSession {
    /// Fails if the viewport is square.
    pub fn new(tree: TreeArena, viewport: Rect) -> ApplicationResult<Self> {
        if viewport.is_square() {
            return Err(DomainError::InvalidRectangle {
                width: viewport.width,
                height: viewport.height,
            }
            .into());
        }
        Ok(Self {
            tree,
            viewport,
            selected: None,
        })
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn into_tree(self) -> TreeArena {
        self.tree
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    /// Tiles for the current state of the tree.
    pub fn frame(&self) -> ApplicationResult<Vec<Tile>> {
        Ok(self.tree.layout(self.viewport)?)
    }

    /// `"<path>  <size>"` for the selection, empty without one.
    pub fn status_line(&self) -> String {
        self.selected
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn hit(&self, point: Point) -> ApplicationResult<Option<LeafHit>> {
        Ok(self.tree.locate(point, self.viewport)?)
    }

    /// Selects the leaf under `point`. Clicking the selected leaf again, or
    /// clicking where there is no leaf, clears the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn select_at(&mut self, point: Point) -> ApplicationResult<Option<&Selection>> {
        let hit = self.hit(point)?;
        self.selected = match hit {
            Some(hit) if self.selected.as_ref().map(|s| s.node) != Some(hit.node) => {
                Some(Selection::from(hit))
            }
            _ => None,
        };
        debug!("select_at: {}", self.status_line());
        Ok(self.selected.as_ref())
    }

    /// Deletes the leaf under `point`. The selection is cleared either way.
    ///
    /// Returns what was deleted, or `None` if nothing was under the point.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_at(&mut self, point: Point) -> ApplicationResult<Option<Selection>> {
        let hit = self.hit(point)?;
        self.selected = None;
        let Some(hit) = hit else {
            return Ok(None);
        };
        self.tree.delete_node(hit.node)?;
        debug!("delete_at: deleted {}", hit);
        Ok(Some(Selection::from(hit)))
    }

    /// Grows the selected leaf by 1%. No-op without a selection.
    pub fn grow_selected(&mut self) -> ApplicationResult<Option<&Selection>> {
        self.resize_selected(|tree, node| tree.grow_node(node, DEFAULT_STEP_PERCENT))
    }

    /// Shrinks the selected leaf by 1%, never below 1. No-op without a selection.
    pub fn shrink_selected(&mut self) -> ApplicationResult<Option<&Selection>> {
        self.resize_selected(|tree, node| tree.shrink_node(node, DEFAULT_STEP_PERCENT))
    }

    fn resize_selected(
        &mut self,
        resize: impl FnOnce(&mut TreeArena, Index) -> Result<u64, DomainError>,
    ) -> ApplicationResult<Option<&Selection>> {
        let Some(node) = self.selected.as_ref().map(|s| s.node) else {
            return Ok(None);
        };
        let size = resize(&mut self.tree, node)?;
        if let Some(selection) = self.selected.as_mut() {
            selection.size = size;
        }
        Ok(self.selected.as_ref())
    }

    /// Applies one event.
    pub fn apply(&mut self, event: SessionEvent) -> ApplicationResult<SessionOutcome> {
        let outcome = match event {
            SessionEvent::Select(point) => SessionOutcome::Selected(self.select_at(point)?.cloned()),
            SessionEvent::Delete(point) => SessionOutcome::Deleted(self.delete_at(point)?),
            SessionEvent::Grow => SessionOutcome::Resized(self.grow_selected()?.cloned()),
            SessionEvent::Shrink => SessionOutcome::Resized(self.shrink_selected()?.cloned()),
            SessionEvent::Frame => SessionOutcome::Frame(self.frame()?),
            SessionEvent::Quit => SessionOutcome::Quit,
        };
        Ok(outcome)
    }
}
