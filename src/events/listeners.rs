use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Owns every listener a page view attaches so teardown can detach them
/// all. Dropping the registry detaches too.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a passive listener whose event is downcast to `E`; events of
    /// another type are ignored.
    pub fn add<E, F>(&mut self, target: &web::EventTarget, kind: &'static str, mut handler: F)
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[events] could not attach {}: {:?}", kind, e);
            return;
        }
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        for l in self.listeners.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}
