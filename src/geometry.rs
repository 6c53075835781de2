use serde::{Deserialize, Serialize};

/// Size assumed for a node whose dimensions are not known yet
pub const FALLBACK_NODE_SIZE: Size = Size {
    width: 200.0,
    height: 100.0,
};

/// Point in canvas coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position shifted by the given deltas
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Round both axes to the nearest multiple of `grid_size`
    pub fn snap_to_grid(&self, grid_size: f64) -> Self {
        if !(grid_size > 0.0) {
            return *self;
        }
        Self::new(
            (self.x / grid_size).round() * grid_size,
            (self.y / grid_size).round() * grid_size,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a screen on the canvas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Centre point of a node at `position`, falling back to a 200x100 box
pub fn node_center(position: Position, size: Option<Size>) -> Position {
    let size = size.unwrap_or(FALLBACK_NODE_SIZE);
    position.offset(size.width / 2.0, size.height / 2.0)
}
