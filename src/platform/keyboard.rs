//! Browser keyboard listeners
//!
//! Raw keydown/keyup events land in a shared `KeyState` that the frame
//! loop reads synchronously. Handlers and frames interleave on the one JS
//! thread, so a read always sees the last completed event.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, Window};

use crate::sim::{Key, KeyState};

pub struct Keyboarder {
    state: Rc<RefCell<KeyState>>,
}

impl Keyboarder {
    /// Install listeners on `window`/`document`. They live for the page.
    pub fn attach(window: &Window, document: &Document) -> Self {
        let state = Rc::new(RefCell::new(KeyState::new()));

        // Key down
        {
            let state = state.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.key_code();
                // Arrows and space would otherwise scroll the page
                if Key::from_code(code).is_some() {
                    event.prevent_default();
                }
                state.borrow_mut().press(code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let state = state.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                state.borrow_mut().release(event.key_code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup never arrives for keys held while focus leaves
        {
            let state = state.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                state.borrow_mut().release_all();
                log::debug!("Keys released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tab hidden
        {
            let state = state.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    state.borrow_mut().release_all();
                    log::debug!("Keys released (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        log::info!("Keyboard listeners attached");
        Self { state }
    }

    /// Current held keys
    pub fn keys(&self) -> Ref<'_, KeyState> {
        self.state.borrow()
    }
}
