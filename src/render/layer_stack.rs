use serde::{Deserialize, Serialize};

/// Draw layers of a chart frame, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Series,
    Axis,
    Legend,
    Labels,
}

impl CanvasLayerKind {
    /// Canonical bottom-to-top order.
    pub const STACK: [CanvasLayerKind; 6] = [
        CanvasLayerKind::Background,
        CanvasLayerKind::Grid,
        CanvasLayerKind::Series,
        CanvasLayerKind::Axis,
        CanvasLayerKind::Legend,
        CanvasLayerKind::Labels,
    ];
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn series_sit_between_grid_and_legend() {
        let position = |kind| {
            CanvasLayerKind::STACK
                .iter()
                .position(|candidate| *candidate == kind)
                .expect("kind in stack")
        };
        assert!(position(CanvasLayerKind::Grid) < position(CanvasLayerKind::Series));
        assert!(position(CanvasLayerKind::Series) < position(CanvasLayerKind::Axis));
        assert!(position(CanvasLayerKind::Series) < position(CanvasLayerKind::Legend));
    }
}
