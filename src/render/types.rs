//! Farbkonvertierung für den Painter.

/// RGBA-Float (0..1) → egui-Farbe.
pub fn color32(rgba: [f32; 4]) -> egui::Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(rgba[0]),
        channel(rgba[1]),
        channel(rgba[2]),
        channel(rgba[3]),
    )
}

/// RGB-Bytes → egui-Farbe.
pub fn rgb32(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// glam → egui.
pub fn pos2(v: glam::Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}
