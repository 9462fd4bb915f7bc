//! Crop rectangle geometry: handle hit-testing, aspect-locked resizing,
//! and frame clamping.
//!
//! The crop rectangle lives in canvas-display pixel coordinates, is
//! constrained to the preview frame, and always matches the active
//! format's aspect ratio. A zero width/height encodes "uninitialized":
//! the engine lazily replaces it with the centered default the first time
//! it is needed after an image load or format change.

/// Side length of the square corner handles in canvas pixels.
pub const HANDLE_SIZE: f64 = 12.0;

/// Minimum crop dimension in canvas pixels; smaller resize targets are no-ops.
pub const MIN_CROP_SIZE: f64 = 20.0;

/// Fraction of the smaller frame dimension used for the lazy default box.
pub const DEFAULT_CROP_FRACTION: f64 = 0.8;

/// One of the four resize handles, named by compass corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    /// CSS cursor name for hovering this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Corner::Nw => "nw-resize",
            Corner::Ne => "ne-resize",
            Corner::Sw => "sw-resize",
            Corner::Se => "se-resize",
        }
    }
}

/// The crop rectangle in canvas-display pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropBox {
    /// The centered default: 80 % of the smaller frame dimension wide,
    /// height derived from the aspect ratio.
    pub fn centered_default(frame_w: f64, frame_h: f64, aspect: f64) -> Self {
        let max_size = (frame_w * DEFAULT_CROP_FRACTION).min(frame_h * DEFAULT_CROP_FRACTION);
        let width = max_size;
        let height = max_size / aspect;
        Self {
            x: (frame_w - width) / 2.0,
            y: (frame_h - height) / 2.0,
            width,
            height,
        }
    }

    /// True while the rectangle awaits lazy initialization.
    pub fn is_unset(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Right edge coordinate.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge coordinate.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inside test, edges inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Canvas position of a corner.
    pub fn corner_point(&self, corner: Corner) -> (f64, f64) {
        match corner {
            Corner::Nw => (self.x, self.y),
            Corner::Ne => (self.right(), self.y),
            Corner::Sw => (self.x, self.bottom()),
            Corner::Se => (self.right(), self.bottom()),
        }
    }

    /// Hit-test the four handle squares ([`HANDLE_SIZE`] px, centered on
    /// the corners). Returns the first match in nw/ne/sw/se order.
    pub fn corner_under_point(&self, x: f64, y: f64) -> Option<Corner> {
        const ORDER: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];
        let half = HANDLE_SIZE / 2.0;

        ORDER.into_iter().find(|&corner| {
            let (cx, cy) = self.corner_point(corner);
            x >= cx - half && x <= cx + half && y >= cy - half && y <= cy + half
        })
    }

    /// Resize by dragging a corner handle to pointer x-position `pointer_x`.
    ///
    /// Width is the independent drag axis; height is derived as
    /// `width / aspect`, so the rectangle never departs from the target
    /// aspect ratio. The opposite corner stays fixed: nw anchors the
    /// bottom-right, ne the bottom-left, sw the top-right, se the
    /// top-left. A drag that would take either dimension below
    /// [`MIN_CROP_SIZE`] is a no-op.
    pub fn resize_from_corner(&mut self, corner: Corner, pointer_x: f64, aspect: f64) {
        let right = self.right();
        let bottom = self.bottom();

        let width = match corner {
            Corner::Nw | Corner::Sw => right - pointer_x,
            Corner::Ne | Corner::Se => pointer_x - self.x,
        };
        let height = width / aspect;
        if width < MIN_CROP_SIZE || height < MIN_CROP_SIZE {
            return;
        }

        self.width = width;
        self.height = height;
        match corner {
            Corner::Nw => {
                self.x = right - width;
                self.y = bottom - height;
            }
            Corner::Ne => {
                self.y = bottom - height;
            }
            Corner::Sw => {
                self.x = right - width;
            }
            Corner::Se => {}
        }
    }

    /// Clamp the rectangle fully inside a `frame_w × frame_h` frame:
    /// origin first, then shrink width/height if the far edge still
    /// overflows.
    pub fn clamp_to_frame(&mut self, frame_w: f64, frame_h: f64) {
        self.clamp_origin(frame_w, frame_h);
        self.width = self.width.min(frame_w - self.x);
        self.height = self.height.min(frame_h - self.y);
    }

    /// Translate-only clamp used while dragging the whole rectangle.
    pub fn clamp_origin(&mut self, frame_w: f64, frame_h: f64) {
        self.x = self.x.min(frame_w - self.width).max(0.0);
        self.y = self.y.min(frame_h - self.height).max(0.0);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
