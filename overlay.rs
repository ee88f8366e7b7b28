//! On-screen diagnostics: the current view angles in degrees.

pub fn diagnostic_lines(pitch: f32, yaw: f32, spin: f32) -> [String; 3] {
    [
        format!("Rot X (Pitch): {:.1}°", pitch.to_degrees()),
        format!("Rot Y (Yaw):   {:.1}°", yaw.to_degrees()),
        format!("Rot Z (Spin):  {:.1}°", spin.to_degrees()),
    ]
}

/// minifb has no text drawing, so the readout rides along in the title bar.
pub fn window_title(base: &str, lines: &[String]) -> String {
    let mut title = String::from(base);
    for line in lines {
        title.push_str(" | ");
        title.push_str(line);
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_are_reported_in_degrees() {
        let lines = diagnostic_lines(38f32.to_radians(), 42f32.to_radians(), 45f32.to_radians());
        assert_eq!(lines[0], "Rot X (Pitch): 38.0°");
        assert_eq!(lines[1], "Rot Y (Yaw):   42.0°");
        assert_eq!(lines[2], "Rot Z (Spin):  45.0°");
    }

    #[test]
    fn negative_angles_keep_their_sign() {
        let lines = diagnostic_lines(-0.5, 0.0, 0.0);
        assert_eq!(lines[0], "Rot X (Pitch): -28.6°");
    }

    #[test]
    fn title_joins_every_line() {
        let lines = diagnostic_lines(0.0, 0.0, 0.0);
        assert_eq!(
            window_title("Ring", &lines),
            "Ring | Rot X (Pitch): 0.0° | Rot Y (Yaw):   0.0° | Rot Z (Spin):  0.0°"
        );
    }
}
