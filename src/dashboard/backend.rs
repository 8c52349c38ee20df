//! The seam to the charting library.

use crate::chart::ChartConfig;

/// Opaque handle to a chart created by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub usize);

/// Whatever actually draws charts.
pub trait ChartBackend {
    /// Create a chart on the canvas `canvas_id` and draw it once.
    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> ChartHandle;
    /// Replace a chart's config and redraw it.
    fn update(&mut self, handle: ChartHandle, config: &ChartConfig);
    /// Release a chart.
    fn destroy(&mut self, handle: ChartHandle);
}

/// A chart held by the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedChart {
    pub canvas_id: String,
    pub config: ChartConfig,
    /// Number of draws, including the initial one.
    pub draws: u32,
}

/// In-memory backend: keeps the latest config per chart.
///
/// The CLI renders and exports from it, the TUI draws from it.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: Vec<Option<MountedChart>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_canvas(&self, canvas_id: &str) -> Option<&MountedChart> {
        self.iter().find(|c| c.canvas_id == canvas_id)
    }

    /// Live charts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &MountedChart> {
        self.charts.iter().filter_map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChartBackend for ChartRegistry {
    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> ChartHandle {
        self.charts.push(Some(MountedChart {
            canvas_id: canvas_id.to_string(),
            config: config.clone(),
            draws: 1,
        }));
        ChartHandle(self.charts.len() - 1)
    }

    fn update(&mut self, handle: ChartHandle, config: &ChartConfig) {
        match self.charts.get_mut(handle.0).and_then(Option::as_mut) {
            Some(chart) => {
                chart.config = config.clone();
                chart.draws += 1;
            }
            None => tracing::warn!(handle = handle.0, "update for unknown chart ignored"),
        }
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if let Some(slot) = self.charts.get_mut(handle.0) {
            *slot = None;
        }
    }
}
