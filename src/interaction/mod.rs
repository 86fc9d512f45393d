//! Headless pointer interaction against rendered surfaces.

pub mod select;
pub mod slider;
pub mod tooltip;

pub use select::CountrySelect;
pub use slider::YearSlider;
pub use tooltip::Tooltip;

use crate::render::Surface;

/// Pointer position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
}

/// Update `tooltip` for a pointer event over `surface`.
///
/// Returns `true` when the tooltip is visible afterwards.
pub fn dispatch(surface: &Surface, tooltip: &mut Tooltip, event: PointerEvent) -> bool {
    match event {
        PointerEvent::Move { x, y } => match surface.hit_test(x, y) {
            Some(shape) => {
                if let Some(hover) = &shape.hover {
                    tooltip.show(shape.id, hover, (x, y));
                }
            }
            None => tooltip.hide(),
        },
        PointerEvent::Leave => tooltip.hide(),
    }
    tooltip.is_visible()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{Geometry, HoverBinding, Shape, Style};

    fn surface() -> Surface {
        let mut surface = Surface::new(200.0, 100.0).with_origin(10.0, 10.0);
        surface.add(
            Shape::new(
                "bar",
                Geometry::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 50.0,
                    height: 50.0,
                },
                Style::fill("steelblue"),
            )
            .with_hover(HoverBinding::new("Year: 1750", (10.0, -10.0)).following()),
        );
        surface
    }

    #[test]
    fn test_move_leave_cycle() {
        let surface = surface();
        let mut tooltip = Tooltip::new();

        assert!(dispatch(&surface, &mut tooltip, PointerEvent::Move { x: 20.0, y: 20.0 }));
        assert_eq!(tooltip.content(), "Year: 1750");
        assert_eq!(tooltip.position(), (30.0, 10.0));

        assert!(!dispatch(&surface, &mut tooltip, PointerEvent::Leave));
    }

    #[test]
    fn test_moving_off_shape_hides() {
        let surface = surface();
        let mut tooltip = Tooltip::new();

        dispatch(&surface, &mut tooltip, PointerEvent::Move { x: 20.0, y: 20.0 });
        assert!(!dispatch(&surface, &mut tooltip, PointerEvent::Move { x: 150.0, y: 20.0 }));
    }
}
