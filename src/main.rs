use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use crate::abs::App;
use crate::config::{Config, WindowConfig};
use crate::scene::QuadScene;

mod abs;
mod config;
mod logging;
mod quad;
mod scene;

/// What the render loop should do in response to a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopAction {
    Continue,
    Quit,
    Resize,
}

fn on_event(event: &Event, config: &WindowConfig) -> LoopAction {
    match event {
        Event::Quit { .. } => LoopAction::Quit,
        Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } if config.close_on_escape => LoopAction::Quit,
        Event::Window {
            win_event: WindowEvent::SizeChanged(..),
            ..
        } => LoopAction::Resize,
        _ => LoopAction::Continue,
    }
}

fn main() {
    let config = Config::load();

    // Logging comes up first so that a broken config file is reported through it.
    let log_config = config
        .as_ref()
        .map(|c| c.log.clone())
        .unwrap_or_default();
    if let Err(e) = logging::init(&log_config) {
        eprintln!("Failed to initialise logging: {e}");
        std::process::exit(1);
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        log::error!("{e}");
        std::process::exit(1);
    }

    log::info!("Shutting down");
}

fn run(config: &Config) -> Result<(), String> {
    let mut app = App::new(&config.window)?;

    let (width, height) = app.drawable_size();
    scene::set_viewport(&app.gl, width, height);

    let quad_scene = QuadScene::new(&app.gl, &config.render)?;
    log::info!("Entering render loop");

    'running: loop {
        let actions: Vec<LoopAction> = app
            .event_pump
            .poll_iter()
            .map(|event| on_event(&event, &config.window))
            .collect();

        for action in actions {
            match action {
                LoopAction::Quit => break 'running,
                LoopAction::Resize => {
                    // The event carries window coordinates; the viewport wants pixels.
                    let (width, height) = app.drawable_size();
                    log::debug!("Framebuffer resized to {width}x{height}");
                    scene::set_viewport(&app.gl, width, height);
                }
                LoopAction::Continue => {}
            }
        }

        quad_scene.render();
        app.swap();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Mod;

    fn key_down(keycode: Keycode) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    fn window_event(win_event: WindowEvent) -> Event {
        Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event,
        }
    }

    #[test]
    fn test_quit_ends_the_loop() {
        let config = WindowConfig::default();
        assert_eq!(on_event(&Event::Quit { timestamp: 0 }, &config), LoopAction::Quit);
    }

    #[test]
    fn test_escape_honours_close_on_escape() {
        let mut config = WindowConfig::default();
        assert_eq!(on_event(&key_down(Keycode::Escape), &config), LoopAction::Quit);

        config.close_on_escape = false;
        assert_eq!(on_event(&key_down(Keycode::Escape), &config), LoopAction::Continue);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let config = WindowConfig::default();
        assert_eq!(on_event(&key_down(Keycode::Space), &config), LoopAction::Continue);
    }

    #[test]
    fn test_size_change_requests_resize() {
        let config = WindowConfig::default();
        assert_eq!(
            on_event(&window_event(WindowEvent::SizeChanged(1024, 768)), &config),
            LoopAction::Resize
        );
        assert_eq!(
            on_event(&window_event(WindowEvent::Moved(10, 10)), &config),
            LoopAction::Continue
        );
    }
}
