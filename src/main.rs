// What you SEE now:
// • A picture (or a gradient grid) fills the window.
// • Move the mouse over it: a glowing, lifted wake follows the pointer and fades.
// • Leave the window: the wake is wiped at once.
// • C wipes the wake by hand. S saves the raw texture to touch_snapshot.png. ESC quits.
// • With debug = true in touch.toml, a second small window mirrors the raw texture.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use touch_texture::config::load_config;
use touch_texture::draw::{draw_crosshair, draw_text_5x7, Drawer};
use touch_texture::surface::{pointer_to_uv, Surface};
use touch_texture::types::FrameBuffer;
use touch_texture::{Error, TouchTexture};

fn main() -> Result<(), Error> {
    env_logger::init();

    /* --- Config ---
       First CLI argument overrides the config path. */
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("touch.toml"));
    let cfg = load_config(&config_path)?;
    let options = cfg.texture.to_options()?;

    /* --- Window, surface, touch texture --- */
    let surface = Surface::from_config(&cfg.surface, cfg.window.width, cfg.window.height)?;
    let (w, h) = (surface.width(), surface.height());
    let mut drawer = Drawer::new("Touch Texture", w, h)?;
    let mut touch = TouchTexture::new(options)?;
    log::info!(
        "{}: {w}x{h} window, {}px texture, trail lasts {} frames",
        config_path.display(),
        touch.options().size,
        touch.options().max_age
    );

    /* --- Reusable screen buffer --- */
    let mut screen = FrameBuffer::new(w, h);

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");
    let mut saved_until: Option<Instant> = None;

    // Pointer-leave is an edge, not a level: reset once per exit.
    let mut pointer_inside = false;
    let mut last_pointer: Option<(f32, f32)> = None;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Pointer -> trail samples (only when it actually moved). */
        match drawer.mouse_pos() {
            Some((mx, my)) => {
                pointer_inside = true;
                if last_pointer != Some((mx, my)) {
                    let (x, y) = pointer_to_uv(mx, my, w, h);
                    touch.add_touch(x, y);
                    last_pointer = Some((mx, my));
                }
            }
            None => {
                if pointer_inside {
                    touch.reset();
                }
                pointer_inside = false;
                last_pointer = None;
            }
        }

        /* 2) Keys */
        if drawer.c_pressed_once() {
            touch.reset();
        }
        if drawer.s_pressed_once() {
            let path = PathBuf::from("touch_snapshot.png");
            match touch.save_snapshot(&path) {
                Ok(()) => {
                    println!("saved {}", path.display());
                    saved_until = Some(now + Duration::from_secs(2));
                }
                Err(e) => eprintln!("{e}"),
            }
        }

        /* 3) Advance the texture one frame. */
        touch.update();

        /* 4) Shade the surface from the texture, then acknowledge the frame. */
        if touch.needs_update() {
            surface.shade(&touch, &mut screen)?;
            touch.acknowledge();
        }

        /* 5) Crosshair + HUD */
        if let Some((mx, my)) = last_pointer {
            draw_crosshair(&mut screen, mx as i32, my as i32, 10, 0x00_FF_CC_33);
        }
        let mut hud = format!("PTS {} | {}", touch.points().len(), hud_fps_text);
        if saved_until.is_some_and(|t| now < t) {
            hud.push_str(" | SAVED");
        }
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 6) Present */
        drawer.present(&screen)?;

        /* 7) FPS counter (prints to terminal + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            println!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
