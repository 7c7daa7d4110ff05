//! Compositor regression test
//!
//! Runs the full pipeline on synthetic sources and checks export
//! determinism, placement, pan rescaling, grain and decode fallback.

use snapstyle_compose::{
    BackgroundKind, CanvasSettings, ComposeError, Compositor, MAX_OUTPUT_DIMENSION, OutputSize,
    Position, PreviewViewport, SourceFile,
};
use snapstyle_core::color;
use snapstyle_test::{RegParams, encode_png, make_checker, make_gradient};

fn settings(width: i32, height: i32) -> CanvasSettings {
    let mut s = CanvasSettings::default();
    s.output = OutputSize::Custom { width, height };
    s.style.padding = 24.0;
    s.style.shadow_blur = 16.0;
    s
}

/// A 24-bit BMP header claiming `i32::MAX` square pixels with no data.
fn oversized_bmp_header() -> Vec<u8> {
    let mut out = Vec::with_capacity(54);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&i32::MAX.to_le_bytes());
    out.extend_from_slice(&i32::MAX.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&[0u8; 24]);
    out
}

#[test]
fn compose_reg() {
    let mut rp = RegParams::new("compose");

    let checker = make_checker(
        90,
        60,
        10,
        color::compose_rgba(240, 240, 240, 255),
        color::compose_rgba(30, 30, 30, 255),
    );
    let png = encode_png(&checker);
    let source = SourceFile::new(&png, Some("captures/checker.png"));

    // Identical inputs give byte-identical PNG output
    let compositor = Compositor::new(settings(320, 240));
    let first = compositor.export(Some(source)).expect("export");
    let second = compositor.export(Some(source)).expect("export");
    rp.compare_strings(&first.png, &second.png);
    rp.compare_strings(b"checker-snapstyle.png", first.filename.as_bytes());
    rp.compare_values(0.0, first.source_skipped as u8 as f64, 0.0);
    rp.compare_values(320.0, first.width as f64, 0.0);
    rp.compare_values(240.0, first.height as f64, 0.0);

    // The PNG holds exactly the rendered canvas
    let rendered = compositor.render(Some(&checker)).expect("render");
    let decoded = snapstyle_io::decode_image(&first.png).expect("decode export");
    rp.compare_pix(&rendered, &decoded);
    rp.write_pix(&rendered).expect("write");

    // No pan and unit zoom: centered in the padded area
    let layout = compositor.layout(90, 60).expect("layout");
    rp.compare_values(160.0, layout.placed.center_x(), 1e-9);
    rp.compare_values(120.0, layout.placed.center_y(), 1e-9);
    rp.compare_values(272.0, layout.placed.w, 1e-9);

    // Pan is captured in preview pixels and rescaled to the export width
    let mut panned = settings(320, 240);
    panned.position = Position {
        x: 10.0,
        y: -4.0,
        scale: 1.0,
    };
    let measured = Compositor::new(panned).with_viewport(PreviewViewport::measured(160.0));
    let moved = measured.layout(90, 60).expect("layout");
    rp.compare_values(180.0, moved.placed.center_x(), 1e-9);
    rp.compare_values(112.0, moved.placed.center_y(), 1e-9);
    let unmeasured = Compositor::new(panned).layout(90, 60).expect("layout");
    rp.compare_values(160.0 + 10.0 * 320.0 / 600.0, unmeasured.placed.center_x(), 1e-9);

    // Grain is deterministic and actually changes the background
    let mut grainy = settings(200, 150);
    grainy.background.kind = BackgroundKind::Solid;
    grainy.background.grain = 0.8;
    let a = Compositor::new(grainy).render(None).expect("render");
    let b = Compositor::new(grainy).render(None).expect("render");
    rp.compare_pix(&a, &b);
    let flat = grainy.background.color1.to_pixel();
    let changed = a.data().iter().filter(|&&p| p != flat).count();
    rp.compare_values(1.0, (changed > 0) as u8 as f64, 0.0);
    rp.write_pix(&a).expect("write");

    // Undecodable bytes export the background only
    let broken = compositor
        .export(Some(SourceFile::new(b"\x89PNG but not really", Some("x.png"))))
        .expect("export");
    let background = compositor.export(None).expect("export");
    rp.compare_values(1.0, broken.source_skipped as u8 as f64, 0.0);
    rp.compare_strings(&background.png, &broken.png);

    // A bitmap header with absurd dimensions is skipped the same way
    let header = oversized_bmp_header();
    let huge = compositor
        .export(Some(SourceFile::new(&header, Some("huge.bmp"))))
        .expect("export");
    rp.compare_values(1.0, huge.source_skipped as u8 as f64, 0.0);
    rp.compare_strings(&background.png, &huge.png);

    // Configuration errors
    let bad_size = Compositor::new(settings(-1, 240)).export(None);
    rp.compare_values(
        1.0,
        matches!(bad_size, Err(ComposeError::InvalidOutputSize { .. })) as u8 as f64,
        0.0,
    );
    let oversized = Compositor::new(settings(i32::MAX, i32::MAX)).export(None);
    rp.compare_values(
        1.0,
        matches!(oversized, Err(ComposeError::InvalidOutputSize { .. })) as u8 as f64,
        0.0,
    );
    let too_wide = Compositor::new(settings(MAX_OUTPUT_DIMENSION + 1, 10)).output_size();
    rp.compare_values(1.0, too_wide.is_err() as u8 as f64, 0.0);
    let mut cramped = settings(100, 100);
    cramped.style.padding = 60.0;
    let cramped = Compositor::new(cramped).export(Some(source));
    rp.compare_values(
        1.0,
        matches!(cramped, Err(ComposeError::EmptyContentArea { .. })) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "compose regression test failed");
}

#[test]
fn compose_settings_reg() {
    let mut rp = RegParams::new("compose_settings");

    let json = r##"{
        "background": { "kind": "gradient", "color1": "#0F172A", "color2": "#38BDF8", "angle": 90 },
        "style": { "corner_radius": 0, "shadow_opacity": 0 },
        "output": { "preset": "linkedin" }
    }"##;
    let settings = CanvasSettings::from_json(json).expect("settings");
    let compositor = Compositor::new(settings);
    let (w, h) = compositor.output_size().expect("size");
    rp.compare_values(1200.0, w as f64, 0.0);
    rp.compare_values(627.0, h as f64, 0.0);

    // 90 degrees runs top to bottom
    let source = make_gradient(64, 64);
    let pix = compositor.render(Some(&source)).expect("render");
    let top = color::extract_rgb(pix.get_pixel(2, 0).expect("pixel"));
    let bottom = color::extract_rgb(pix.get_pixel(2, h - 1).expect("pixel"));
    rp.compare_values(0x0f as f64, top.0 as f64, 2.0);
    rp.compare_values(0x38 as f64, bottom.0 as f64, 2.0);
    rp.write_pix(&pix).expect("write");

    // Square corners, no shadow: the source corner pixel lands unchanged
    let layout = compositor.layout(64, 64).expect("layout");
    let x = layout.placed.x.ceil() as u32 + 1;
    let y = layout.placed.y.ceil() as u32 + 1;
    let (r, g, b) = color::extract_rgb(pix.get_pixel(x, y).expect("pixel"));
    rp.compare_values(r as f64, g as f64, 0.0);
    rp.compare_values(g as f64, b as f64, 0.0);
    rp.compare_values(0.0, r as f64, 8.0);

    // Saved settings load back unchanged
    let saved = settings.to_json().expect("json");
    let loaded = CanvasSettings::from_json(&saved).expect("reload");
    rp.compare_strings(saved.as_bytes(), loaded.to_json().expect("json").as_bytes());

    assert!(rp.cleanup(), "compose settings regression test failed");
}
