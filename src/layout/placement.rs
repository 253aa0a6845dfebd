#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HorizontalSpan {
    pub x0: f64,
    pub x1: f64,
    pub x_mid: f64,
}

/// Geometry of one category's grid slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SlotGeometry {
    pub slot_width: f64,
    pub lane_width: f64,
    pub offset: f64,
    pub grid_gap: f64,
}

impl SlotGeometry {
    pub fn new(
        canvas_width: f64,
        category_count: usize,
        slot: usize,
        lane_count: usize,
        grid_gap: f64,
    ) -> Self {
        let slot_width = canvas_width / category_count.max(1) as f64;
        let lane_width = (slot_width - grid_gap) / lane_count.max(1) as f64;
        Self {
            slot_width,
            lane_width,
            offset: slot as f64 * (slot_width + grid_gap / 2.0),
            grid_gap,
        }
    }

    pub fn place(&self, lane: usize, node_width: f64) -> HorizontalSpan {
        let x_mid = self.lane_width * lane as f64 + self.lane_width / 2.0 + self.offset;
        HorizontalSpan {
            x0: x_mid - node_width / 2.0,
            x1: x_mid + node_width / 2.0,
            x_mid,
        }
    }

    /// Left and right edge of the lane area.
    pub fn bounds(&self) -> (f64, f64) {
        (self.offset, self.offset + self.slot_width - self.grid_gap)
    }
}
