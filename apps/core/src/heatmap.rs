//! Weekly hour-by-day AQI intensity grid.

use rand::Rng;
use serde::Serialize;

use crate::color::{Rgb, Rgba};

pub const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const HOURS: usize = 24;
pub const CELL_COUNT: usize = DAYS.len() * HOURS;

const GOOD_CUTOFF: f64 = 0.6;
const MODERATE_CUTOFF: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatBand {
    Good,
    Moderate,
    Poor,
}

impl HeatBand {
    pub fn for_intensity(intensity: f64) -> Self {
        if intensity < GOOD_CUTOFF {
            Self::Good
        } else if intensity < MODERATE_CUTOFF {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Self::Good => Rgb::new(0, 227, 150),
            Self::Moderate => Rgb::new(254, 176, 25),
            Self::Poor => Rgb::new(255, 69, 96),
        }
    }

    /// Alpha range `(base, spread)`; a cell's alpha is `base + r * spread`.
    const fn alpha_range(self) -> (f64, f64) {
        match self {
            Self::Good => (0.2, 0.4),
            Self::Moderate => (0.3, 0.5),
            Self::Poor => (0.4, 0.6),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatCell {
    pub day: usize,
    pub hour: usize,
    pub intensity: f64,
    pub band: HeatBand,
    pub alpha: f64,
}

impl HeatCell {
    pub const fn color(&self) -> Rgba {
        self.band.color().with_alpha(self.alpha)
    }

    pub fn aqi(&self) -> u32 {
        (self.intensity * 100.0).floor() as u32
    }

    pub fn tooltip(&self) -> String {
        let day = DAYS.get(self.day).copied().unwrap_or("?");
        format!("{day} {}:00 - AQI: {}", self.hour, self.aqi())
    }
}

/// 168 cells, day-major: index `day * 24 + hour`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    cells: Vec<HeatCell>,
}

impl Heatmap {
    /// Draws an intensity, then an alpha, for every cell in order.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let cells = (0..CELL_COUNT)
            .map(|index| {
                let intensity: f64 = rng.gen();
                let band = HeatBand::for_intensity(intensity);
                let (base, spread) = band.alpha_range();
                let alpha = rng.gen::<f64>().mul_add(spread, base);
                HeatCell {
                    day: index / HOURS,
                    hour: index % HOURS,
                    intensity,
                    band,
                    alpha,
                }
            })
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[HeatCell] {
        &self.cells
    }

    pub fn cell(&self, day: usize, hour: usize) -> Option<&HeatCell> {
        if day >= DAYS.len() || hour >= HOURS {
            return None;
        }
        self.cells.get(day * HOURS + hour)
    }

    pub fn row(&self, day: usize) -> &[HeatCell] {
        let start = (day * HOURS).min(self.cells.len());
        let end = (start + HOURS).min(self.cells.len());
        &self.cells[start..end]
    }
}

/// Selected cell of the grid, moved with the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeatCursor {
    pub day: usize,
    pub hour: usize,
}

impl HeatCursor {
    pub fn left(&mut self) {
        self.hour = self.hour.checked_sub(1).unwrap_or(HOURS - 1);
    }

    pub fn right(&mut self) {
        self.hour = (self.hour + 1) % HOURS;
    }

    pub fn up(&mut self) {
        self.day = self.day.checked_sub(1).unwrap_or(DAYS.len() - 1);
    }

    pub fn down(&mut self) {
        self.day = (self.day + 1) % DAYS.len();
    }
}
