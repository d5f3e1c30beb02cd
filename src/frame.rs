use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Something advanced once per animation frame.
pub trait FrameDriver {
    fn frame(&mut self);
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running requestAnimationFrame loop. Stopping is idempotent; once
/// stopped no further frame of the driver runs.
pub struct LoopHandle {
    tick: Tick,
    disposed: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

pub fn start_loop<D: FrameDriver + 'static>(driver: Rc<RefCell<D>>) -> LoopHandle {
    let tick: Tick = Rc::new(RefCell::new(None));
    let disposed = Rc::new(Cell::new(false));
    let raf_id = Rc::new(Cell::new(None));
    let running = Rc::new(Cell::new(false));

    let tick_clone = tick.clone();
    let disposed_tick = disposed.clone();
    let raf_tick = raf_id.clone();
    let running_tick = running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if disposed_tick.get() {
            return;
        }
        running_tick.set(true);
        if let Ok(mut d) = driver.try_borrow_mut() {
            d.frame();
        }
        running_tick.set(false);
        if disposed_tick.get() {
            return;
        }
        raf_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    raf_id.set(request_frame(&tick));

    LoopHandle {
        tick,
        disposed,
        raf_id,
        running,
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let window = web::window()?;
    let guard = tick.borrow();
    let cb = guard.as_ref()?;
    window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

impl LoopHandle {
    pub fn is_stopped(&self) -> bool {
        self.disposed.get()
    }

    pub fn stop(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Break the closure's self-reference; defer it if the closure is the caller
        if self.running.get() {
            let tick = self.tick.clone();
            spawn_local(async move {
                tick.borrow_mut().take();
            });
        } else {
            self.tick.borrow_mut().take();
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
