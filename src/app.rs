use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use crate::config::Settings;
use crate::daynight::DayPhase;
use crate::events::FarmEvent;
use crate::farm::{Farm, Scene};
use crate::input::InputState;
use crate::session::{Character, Screen};

/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// How often to re-evaluate the environment clock (seconds).
const ENVIRONMENT_INTERVAL: f64 = 1.0;

// ---------------------------------------------------------------------------
// Frame pacing
// ---------------------------------------------------------------------------

/// Frame times gathered over one logging window.
struct FramePacing {
    window_start: Instant,
    frames: u32,
    busy_secs: f64,
    worst_secs: f64,
    /// Frames since startup, across every window.
    lifetime_frames: u64,
}

impl FramePacing {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            busy_secs: 0.0,
            worst_secs: 0.0,
            lifetime_frames: 0,
        }
    }

    fn record_frame(&mut self, dt: f64) {
        self.frames += 1;
        self.lifetime_frames += 1;
        self.busy_secs += dt;
        self.worst_secs = self.worst_secs.max(dt);

        let window = self.window_start.elapsed().as_secs_f64();
        if window >= FPS_LOG_INTERVAL {
            log::info!("{}", self.summary(window));
            self.window_start = Instant::now();
            self.frames = 0;
            self.busy_secs = 0.0;
            self.worst_secs = 0.0;
        }
    }

    /// One log line describing the current window of `window` seconds.
    fn summary(&self, window: f64) -> String {
        let frames = self.frames.max(1) as f64;
        format!(
            "{:.0} fps over {:.1}s | mean frame {:.2}ms | worst {:.2}ms | {} frames since start",
            self.frames as f64 / window,
            window,
            self.busy_secs / frames * 1000.0,
            self.worst_secs * 1000.0,
            self.lifetime_frames,
        )
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    farm: Farm,
    input: InputState,

    last_frame_time: Option<Instant>,
    pacing: FramePacing,

    // Environment is re-sampled on a slow cadence; phase changes are logged.
    last_environment: Option<Instant>,
    phase: Option<DayPhase>,

    // Reusable scene handed to the render driver (avoid per-frame allocation)
    scene: Scene,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            window: None,
            farm: Farm::new(settings),
            input: InputState::new(),
            last_frame_time: None,
            pacing: FramePacing::new(),
            last_environment: None,
            phase: None,
            scene: Scene::default(),
        }
    }

    fn lock_pointer(&mut self, locked: bool) {
        let Some(window) = &self.window else { return };
        if locked {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                log::warn!("pointer lock unavailable: {e}");
                return;
            }
        } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("failed to release pointer: {e}");
        }
        window.set_cursor_visible(!locked);
        self.input.set_pointer_locked(locked);
    }

    fn on_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else { return };
        let pressed = event.state == ElementState::Pressed;
        if self.input.key(code, pressed) || !pressed || event.repeat {
            return;
        }
        match code {
            KeyCode::Escape => {
                if self.input.pointer_locked() {
                    self.lock_pointer(false);
                } else if !self.farm.leave_mini_game() && self.farm.session().screen == Screen::Game {
                    self.farm.go_back();
                }
            }
            KeyCode::Enter if self.farm.session().screen == Screen::Start => self.farm.start_game(),
            KeyCode::Digit1 | KeyCode::Digit2 | KeyCode::Digit3
                if self.farm.session().screen == Screen::Start =>
            {
                let character = match code {
                    KeyCode::Digit1 => Character::Ailani,
                    KeyCode::Digit2 => Character::Aylin,
                    _ => Character::Carolina,
                };
                self.farm.session_mut().set_character(character);
                log::info!("selected {}", character.name());
                if let Some(w) = &self.window {
                    w.set_title(&format!("Farmwalk - {}", character.name()));
                }
            }
            _ => {}
        }
    }

    fn sample_environment(&mut self, now: Instant) {
        let due = self
            .last_environment
            .map_or(true, |t| now.duration_since(t).as_secs_f64() >= ENVIRONMENT_INTERVAL);
        if !due {
            return;
        }
        self.last_environment = Some(now);
        let env = self.farm.environment();
        if self.phase != Some(env.phase) {
            log::info!(
                "{} at {:.2}h (sun angle {:.2}, exposure {:.2})",
                env.phase.label(),
                env.hour,
                env.angle,
                env.exposure
            );
            self.phase = Some(env.phase);
        }
    }

    fn run_frame(&mut self, dt: f32) {
        let input = self.input.take_frame();
        for event in self.farm.frame(dt, &input) {
            match event {
                FarmEvent::Vocalized { species, position } => {
                    log::debug!("{} vocalized at ({:.1}, {:.1})", species.label(), position.x, position.y)
                }
                FarmEvent::StarCollected { collected, total } => {
                    log::debug!("star event {collected}/{total}")
                }
                FarmEvent::PortalTriggered(screen) => log::debug!("heading to {}", screen.label()),
                FarmEvent::ScreenChanged(screen) => log::debug!("now on the {} screen", screen.label()),
            }
        }
        self.farm.snapshot(&mut self.scene);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let title = format!("Farmwalk - {}", self.farm.session().character.name());
        let attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        // Continuous game loop
        event_loop.set_control_flow(ControlFlow::Poll);
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.mouse_motion(dx as f32, dy as f32);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
                self.lock_pointer(false);
            }
            WindowEvent::KeyboardInput { event, .. } => self.on_key(&event),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if !self.input.pointer_locked() && self.farm.session().screen == Screen::Game {
                    self.lock_pointer(true);
                }
            }
            WindowEvent::Touch(touch) => {
                let at = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => self.input.touch_start(touch.id, at),
                    TouchPhase::Moved => self.input.touch_move(touch.id, at),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.input.touch_end(touch.id),
                }
            }
            WindowEvent::RedrawRequested => {
                // --- Timing ---
                let now = Instant::now();
                if let Some(last) = self.last_frame_time {
                    let dt = now.duration_since(last).as_secs_f64();
                    self.pacing.record_frame(dt);
                    self.run_frame(dt as f32);
                }
                self.last_frame_time = Some(now);
                self.sample_environment(now);
            }
            _ => {}
        }
    }
}

/// Entry point: read settings, create the event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;
    Ok(())
}
