//! Pointer-following cursor overlay.

/// Targets that enlarge the cursor ring.
pub const INTERACTIVE_SELECTOR: &str = "a, button, [data-interactive], .cursor-pointer";

const RING_SIZE_PX: f64 = 20.0;
const RING_HOVER_SIZE_PX: f64 = 35.0;
const RING_OPACITY: f64 = 0.15;
const RING_HOVER_OPACITY: f64 = 0.25;
const RING_HOVER_SCALE: f64 = 1.8;
const DOT_SIZE_PX: f64 = 6.0;
const DOT_OPACITY: f64 = 0.4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub hovering: bool,
    /// False until the first pointer move; nothing renders before that.
    pub visible: bool,
}

impl PointerState {
    pub fn moved(self, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visible: true,
            ..self
        }
    }

    pub fn hovered(self, hovering: bool) -> Self {
        Self { hovering, ..self }
    }

    pub fn ring(&self) -> Overlay {
        let (size, opacity, scale) = if self.hovering {
            (RING_HOVER_SIZE_PX, RING_HOVER_OPACITY, RING_HOVER_SCALE)
        } else {
            (RING_SIZE_PX, RING_OPACITY, 1.0)
        };

        Overlay {
            x: self.x,
            y: self.y,
            size,
            opacity,
            scale,
        }
    }

    pub fn dot(&self) -> Overlay {
        Overlay {
            x: self.x,
            y: self.y,
            size: DOT_SIZE_PX,
            opacity: DOT_OPACITY,
            scale: 1.0,
        }
    }
}

/// One overlay circle, centred on `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl Overlay {
    pub fn position_style(&self) -> String {
        format!(
            "left: {:.1}px; top: {:.1}px; transform: translate(-50%, -50%) scale({});",
            self.x, self.y, self.scale
        )
    }

    pub fn body_style(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; opacity: {};",
            self.opacity,
            size = self.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_first_move() {
        let state = PointerState::default();
        assert!(!state.visible);

        let state = state.moved(12.0, 34.0);
        assert!(state.visible);
        assert_eq!((state.x, state.y), (12.0, 34.0));
    }

    #[test]
    fn hovering_enlarges_the_ring_only() {
        let state = PointerState::default().moved(1.0, 2.0).hovered(true);

        let ring = state.ring();
        assert_eq!(ring.size, RING_HOVER_SIZE_PX);
        assert_eq!(ring.scale, RING_HOVER_SCALE);
        assert_eq!(state.dot().size, DOT_SIZE_PX);

        let ring = state.hovered(false).ring();
        assert_eq!(ring.size, RING_SIZE_PX);
        assert_eq!(ring.opacity, RING_OPACITY);
    }

    #[test]
    fn hover_keeps_last_position() {
        let state = PointerState::default().moved(5.0, 6.0).hovered(true);
        assert_eq!((state.x, state.y), (5.0, 6.0));
    }

    #[test]
    fn styles_are_pure_functions_of_state() {
        let ring = PointerState::default().moved(10.0, 20.0).ring();

        assert_eq!(
            ring.position_style(),
            "left: 10.0px; top: 20.0px; transform: translate(-50%, -50%) scale(1);"
        );
        assert_eq!(ring.body_style(), "width: 20px; height: 20px; opacity: 0.15;");
    }
}
