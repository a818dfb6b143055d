use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use wasm_bindgen::{closure::Closure, JsCast};
use web_time::Instant;

use crate::{app::App, error::Error, gl::Renderer, js};

type FrameCallback = Closure<dyn FnMut()>;

/// Drives `app` from `requestAnimationFrame` until the page is hidden.
///
/// Every frame clears the canvas, then calls [`App::update`] and
/// [`App::render`] with the elapsed time in seconds. On `pagehide` the loop
/// stops and [`App::shutdown`] runs once. `app` must already be initialized.
///
/// # Errors
/// * `Error::Initialization` - no window, or the first frame could not be
///   scheduled
pub fn run<A: App + 'static>(renderer: Renderer, app: A) -> Result<(), Error> {
    let window = js::window()?;
    let app = Rc::new(RefCell::new(app));
    let running = Rc::new(Cell::new(true));

    // stop and dispose when the page goes away
    {
        let app = app.clone();
        let running = running.clone();
        let on_hide = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if running.replace(false) {
                app.borrow_mut().shutdown();
            }
        }) as Box<dyn FnMut(_)>);

        window
            .add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())
            .map_err(|_| Error::event_listener_failed("pagehide"))?;
        on_hide.forget();
    }

    // the frame callback re-schedules itself through this slot
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let mut last_frame = Instant::now();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            return;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        renderer.begin_frame();
        {
            let mut app = app.borrow_mut();
            app.update(dt);
            app.render(dt);
        }

        if let Err(e) = next.borrow().as_ref().map_or(Ok(()), request_animation_frame) {
            log::error!("frame loop stopped: {e}");
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = slot.borrow().as_ref() {
        request_animation_frame(callback)?;
    }

    Ok(())
}

fn request_animation_frame(callback: &FrameCallback) -> Result<(), Error> {
    js::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map(|_| ())
        .map_err(|_| Error::animation_frame_failed())
}
