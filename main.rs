use std::time::Duration;

use anyhow::Context;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use dyson_ring::config::SceneConfig;
use dyson_ring::overlay;
use dyson_ring::scene::Scene;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("dyson_ring=info"))
        .init();

    let config = SceneConfig::default();
    let (width, height) = (config.window.width, config.window.height);

    let mut scene = Scene::new(config.clone()).context("invalid scene configuration")?;
    let faces: usize = scene.segments().iter().map(|s| s.faces.len()).sum();
    let lights: usize = scene.segments().iter().map(|s| s.light_count()).sum();
    log::info!(
        "built ring: {} segments, {} faces, {} lights",
        scene.segments().len(),
        faces,
        lights
    );

    let mut window = Window::new(
        config.window.title,
        width,
        height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )
    .context("failed to open render window")?;
    window.limit_update_rate(Some(Duration::from_secs_f64(
        1.0 / f64::from(config.window.fps),
    )));

    while window.is_open() && !window.is_key_down(Key::Escape) {
        scene.control_mut().update(
            window.get_mouse_down(MouseButton::Left),
            window.get_mouse_pos(MouseMode::Pass),
        );

        scene.render();

        let lines = scene.overlay_lines();
        log::trace!("{}", lines.join(" "));
        window.set_title(&overlay::window_title(config.window.title, &lines));

        window
            .update_with_buffer(scene.frame().color_buffer(), width, height)
            .context("failed to present frame")?;
        scene.advance();
    }

    log::info!("exiting after {} frames", scene.frame_index());
    Ok(())
}
