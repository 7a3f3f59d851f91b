pub(crate) const MAX_COLUMNS: u16 = 3;
pub(crate) const LABEL_WIDTH: u16 = 10;
pub(crate) const CELL_WIDTH: u16 = LABEL_WIDTH + 5;
pub(crate) const X_SPACING: u16 = 3;
pub(crate) const ROW_STRIDE: u16 = 4;

/// Inclusive corner coordinates of one grid cell's frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CellRect {
    pub(crate) x0: u16,
    pub(crate) y0: u16,
    pub(crate) x1: u16,
    pub(crate) y1: u16,
}

impl CellRect {
    pub(crate) fn center(self) -> (u16, u16) {
        ((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    /// Strict interior test; clicking the drawn frame itself never registers.
    pub(crate) fn contains(self, x: u16, y: u16) -> bool {
        x > self.x0 && x < self.x1 && y > self.y0 && y < self.y1
    }

    pub(crate) fn to_rect(self) -> ratatui::layout::Rect {
        ratatui::layout::Rect::new(
            self.x0,
            self.y0,
            self.x1 - self.x0 + 1,
            self.y1 - self.y0 + 1,
        )
    }
}

/// Maps a zero-based position in the sorted entity list to its on-screen
/// cell. Three columns, row-major.
pub(crate) fn cell_rect(index: usize) -> CellRect {
    let row = index as u16 / MAX_COLUMNS;
    let col = index as u16 % MAX_COLUMNS;
    let x0 = 1 + col * (CELL_WIDTH + X_SPACING);
    let y0 = 1 + row * ROW_STRIDE;
    CellRect {
        x0,
        y0,
        x1: x0 + CELL_WIDTH,
        y1: y0 + 2,
    }
}

/// Inverse of `cell_rect`: the index whose cell interior contains the point,
/// if any. Cells are disjoint by construction, so at most one matches.
pub(crate) fn hit_test(x: u16, y: u16, len: usize) -> Option<usize> {
    (0..len).find(|&index| cell_rect(index).contains(x, y))
}

/// Label shown inside a cell: `syncing...` while a sync is queued, else the
/// repo name centered in the fixed label width or truncated with `...`.
pub(crate) fn label_text(name: &str, syncing: bool) -> String {
    let message = if syncing { "syncing..." } else { name };
    let width = LABEL_WIDTH as usize;
    let length = message.chars().count();
    if length <= width {
        let padding = " ".repeat((width - length) / 2);
        format!("{padding}{message}{padding}")
    } else {
        let mut truncated: String = message.chars().take(width - 3).collect();
        truncated.push_str("...");
        truncated
    }
}
