//! Seat grid generation.
//!
//! For a requested capacity `N` the grid has `ceil(sqrt(N))` seats per row and
//! `ceil(N / seats_per_row)` rows; the last row may be short. Rows are
//! lettered from `a` (continuing `aa`, `ab`, ... past `z`) and seat numbers are
//! 1-based within a row. Capacity 20 yields `a1..a5` through `d1..d5`.

use crate::seat::{Seat, SeatCategory};

/// Capacity used when a movie is scheduled without an explicit layout.
pub const DEFAULT_CAPACITY: usize = 20;

/// Shape of one screening's seat grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLayout {
    /// Total number of seats
    pub capacity: usize,
    /// Number of trailing rows whose seats are premium
    pub premium_rows: usize,
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, premium_rows: 0 }
    }
}

impl SeatLayout {
    /// Standard-only layout with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, premium_rows: 0 }
    }

    /// Seats per row: `ceil(sqrt(capacity))`.
    pub fn seats_per_row(&self) -> usize {
        if self.capacity == 0 {
            return 0;
        }

        // Integer ceil(sqrt(n)), avoiding float rounding for large capacities
        let mut side = (self.capacity as f64).sqrt() as usize;
        while side * side < self.capacity {
            side += 1;
        }
        while side > 1 && (side - 1) * (side - 1) >= self.capacity {
            side -= 1;
        }
        side
    }

    /// Number of rows: `ceil(capacity / seats_per_row)`.
    pub fn rows(&self) -> usize {
        let per_row = self.seats_per_row();
        if per_row == 0 { 0 } else { self.capacity.div_ceil(per_row) }
    }

    /// Seat ids in grid order (row by row, then by column).
    pub fn seat_ids(&self) -> Vec<String> {
        let per_row = self.seats_per_row();
        (0..self.capacity)
            .map(|n| format!("{}{}", row_label(n / per_row), n % per_row + 1))
            .collect()
    }

    /// Build the seats for this layout, in grid order.
    pub(crate) fn build_seats(&self) -> Vec<Seat> {
        let per_row = self.seats_per_row();
        let rows = self.rows();
        let first_premium_row = rows.saturating_sub(self.premium_rows);

        self.seat_ids()
            .into_iter()
            .enumerate()
            .map(|(n, id)| {
                let category = if n / per_row >= first_premium_row {
                    SeatCategory::premium()
                } else {
                    SeatCategory::Standard
                };
                Seat::with_category(id, category)
            })
            .collect()
    }
}

/// Spreadsheet-style row label: 0 → `a`, 25 → `z`, 26 → `aa`.
pub fn row_label(mut row: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'a' + (row % 26) as u8);
        if row < 26 {
            break;
        }
        row = row / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
