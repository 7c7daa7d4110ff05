//! Picker regression test
//!
//! Drives a full drag session on each control, checks clamping outside
//! the bounds, typed hex commits, and swatch copying.

use snapstyle_color::{
    ColorPicker, ControlBounds, CopyOutcome, MemoryClipboard, PickerControl, Point,
    copy_swatch,
};
use snapstyle_test::RegParams;

#[test]
fn picker_reg() {
    let mut rp = RegParams::new("picker");

    let plane = ControlBounds::new(0.0, 0.0, 256.0, 256.0);
    let strip = ControlBounds::new(0.0, 300.0, 360.0, 16.0);

    let mut picker = ColorPicker::new("#3B82F6");
    rp.compare_values(217.0, picker.hsv().h, 1.0);

    // Drag the plane past its top-right corner: full saturation and value
    picker.pointer_down(PickerControl::SatValPlane, plane, Point::new(128.0, 128.0));
    rp.compare_values(50.0, picker.hsv().s, 1e-9);
    rp.compare_values(50.0, picker.hsv().v, 1e-9);
    picker.pointer_move(Point::new(900.0, -400.0));
    let up = picker.pointer_up(Point::new(1000.0, -500.0)).expect("final sample");
    rp.compare_values(100.0, up.hsv.s, 0.0);
    rp.compare_values(100.0, up.hsv.v, 0.0);
    rp.compare_strings(picker.hex_input().as_bytes(), up.hex.as_bytes());

    // Hue strip: far left is red, far right wraps back to red
    picker.pointer_down(PickerControl::HueStrip, strip, Point::new(-5.0, 308.0));
    rp.compare_values(0.0, picker.hsv().h, 0.0);
    let end = picker.pointer_up(Point::new(360.0, 308.0)).expect("final sample");
    rp.compare_values(0.0, end.hsv.h, 0.0);
    rp.compare_strings(end.hex.as_bytes(), b"#ff0000");

    // Value strip to the middle
    picker.pointer_down(PickerControl::ValueStrip, strip, Point::new(180.0, 0.0));
    picker.pointer_up(Point::new(180.0, 0.0));
    rp.compare_values(50.0, picker.hsv().v, 1e-9);
    rp.compare_strings(picker.hex().as_bytes(), b"#800000");

    // Idle events do nothing
    rp.compare_values(1.0, picker.pointer_move(Point::new(0.0, 0.0)).is_none() as u8 as f64, 0.0);

    // Typed hex only commits complete colors
    for partial in ["#", "#1", "#12345", "#12345g", "1234567"] {
        rp.compare_values(1.0, picker.set_hex_input(partial).is_none() as u8 as f64, 0.0);
        rp.compare_strings(picker.hex().as_bytes(), b"#800000");
    }
    let typed = picker.set_hex_input("#22C55E").expect("complete hex commits");
    rp.compare_strings(typed.hex.as_bytes(), b"#22c55e");
    rp.compare_strings(picker.hex_input().as_bytes(), b"#22C55E");
    rp.compare_strings(picker.hex().as_bytes(), b"#22c55e");
    rp.compare_values(9.0, picker.palettes().len() as f64, 0.0);

    // Swatch copy writes uppercase and leaves the picker alone
    let mut clip = MemoryClipboard::new();
    let swatch = picker.palettes()[0].colors[1];
    let outcome = copy_swatch(&mut clip, swatch);
    rp.compare_values(1.0, matches!(outcome, CopyOutcome::Copied(_)) as u8 as f64, 0.0);
    rp.compare_strings(
        clip.contents().unwrap_or_default().as_bytes(),
        swatch.to_hex_upper().as_bytes(),
    );
    rp.compare_strings(picker.hex().as_bytes(), b"#22c55e");

    assert!(rp.cleanup(), "picker regression test failed");
}
