use eframe::egui::{
    Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Widget,
    epaint::CircleShape,
};
use geobox::{BoundingBox, Coordinate};

const BACKGROUND: Color32 = Color32::from_rgb(229, 241, 250);
const GRID: Color32 = Color32::from_rgb(200, 214, 226);
const BOX_OUTLINE: Color32 = Color32::from_rgb(202, 81, 60);
const MARKER: Color32 = Color32::from_rgb(214, 40, 40);

/// Plain-canvas map panel: one marker at a time plus the current query box,
/// drawn around a view center at a fixed degree span. No tiles are fetched.
pub struct MapView {
    pub view_center: Coordinate,
    /// Full longitude span of the visible area, in degrees.
    pub view_span: f64,
    pub marker: Option<Coordinate>,
    pub bbox: Option<BoundingBox>,
}

struct Projection {
    rect: Rect,
    center: Coordinate,
    degrees_per_pixel: f64,
}

impl Projection {
    fn to_screen(&self, lon: f64, lat: f64) -> Pos2 {
        let x = self.rect.center().x + ((lon - self.center.lon()) / self.degrees_per_pixel) as f32;
        // screen y grows downward, latitude grows upward
        let y = self.rect.center().y - ((lat - self.center.lat()) / self.degrees_per_pixel) as f32;
        Pos2 { x, y }
    }
}

impl Widget for MapView {
    fn ui(self, ui: &mut eframe::egui::Ui) -> eframe::egui::Response {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;
        let proj = Projection {
            rect,
            center: self.view_center,
            degrees_per_pixel: self.view_span / f64::from(rect.width().max(1.0)),
        };

        painter.add(Shape::rect_filled(rect, 0.0, BACKGROUND));

        // graticule through the view center
        let center_px = proj.to_screen(self.view_center.lon(), self.view_center.lat());
        let grid = Stroke::new(1.0, GRID);
        painter.add(Shape::line_segment(
            [Pos2::new(rect.left(), center_px.y), Pos2::new(rect.right(), center_px.y)],
            grid,
        ));
        painter.add(Shape::line_segment(
            [Pos2::new(center_px.x, rect.top()), Pos2::new(center_px.x, rect.bottom())],
            grid,
        ));

        if let Some(bbox) = self.bbox {
            let corners = vec![
                proj.to_screen(bbox.xmin, bbox.ymin),
                proj.to_screen(bbox.xmax, bbox.ymin),
                proj.to_screen(bbox.xmax, bbox.ymax),
                proj.to_screen(bbox.xmin, bbox.ymax),
            ];
            painter.add(Shape::closed_line(corners, Stroke::new(1.5, BOX_OUTLINE)));
        }

        if let Some(marker) = self.marker {
            let center = proj.to_screen(marker.lon(), marker.lat());
            painter.add(Shape::Circle(CircleShape {
                center,
                radius: 6.0,
                fill: MARKER,
                stroke: Stroke::new(1.5, Color32::WHITE),
            }));
        }

        painter.text(
            Pos2::new(rect.left() + 4.0, rect.bottom() - 4.0),
            Align2::LEFT_BOTTOM,
            format!(
                "center {:.4}, {:.4}  span {:.3}°",
                self.view_center.lon(),
                self.view_center.lat(),
                self.view_span
            ),
            FontId::proportional(12.0),
            Color32::DARK_GRAY,
        );

        response
    }
}
