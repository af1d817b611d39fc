use crate::config::TerminalConfig;
use crate::host::JsHost;
use crate::session::{Key, TerminalSession};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// A terminal window, exported to JavaScript.
///
/// Each instance owns its own session; the page creates one per terminal
/// window and drops it when the window closes.
#[wasm_bindgen]
pub struct Terminal {
    session: TerminalSession<JsHost>,
}

#[wasm_bindgen]
impl Terminal {
    /// `config` is JSON (may be empty). Callbacks are optional; a missing
    /// one makes the matching command report that it is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: &str,
        open_app: Option<Function>,
        add_folder: Option<Function>,
        close_window: Option<Function>,
        track_event: Option<Function>,
    ) -> Result<Terminal, JsValue> {
        let config =
            TerminalConfig::from_json(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let host = JsHost::new(open_app, add_folder, close_window, track_event);
        let session =
            TerminalSession::new(config, host).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Terminal { session })
    }

    /// Feed one `keydown`. Returns `true` if the key was handled and the
    /// page should call `preventDefault`.
    #[wasm_bindgen]
    pub fn key(&mut self, key: &str, ctrl: bool) -> bool {
        match Key::from_dom(key, ctrl) {
            Some(k) => {
                self.session.handle_key(k);
                true
            }
            None => false,
        }
    }

    /// Mirror the value of the page's `<input>` element.
    #[wasm_bindgen]
    pub fn set_input(&mut self, text: &str) {
        self.session.set_input(text);
    }

    #[wasm_bindgen]
    pub fn submit(&mut self) {
        self.session.submit();
    }

    #[wasm_bindgen]
    pub fn exec(&mut self, line: &str) {
        self.session.run(line);
    }

    #[wasm_bindgen]
    pub fn input(&self) -> String {
        self.session.input().as_str().to_string()
    }

    #[wasm_bindgen]
    pub fn cursor(&self) -> usize {
        self.session.input().cursor()
    }

    #[wasm_bindgen]
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    #[wasm_bindgen]
    pub fn cwd(&self) -> String {
        self.session.path_display()
    }

    #[wasm_bindgen]
    pub fn render_html(&self) -> String {
        self.session.render_html()
    }

    #[wasm_bindgen]
    pub fn scrollback_json(&self) -> String {
        self.session.scrollback_json()
    }

    #[wasm_bindgen]
    pub fn welcome(&self) -> Vec<JsValue> {
        self.session
            .config()
            .welcome
            .iter()
            .map(|l| JsValue::from_str(l))
            .collect()
    }

    #[wasm_bindgen]
    pub fn is_closed(&self) -> bool {
        self.session.is_closed()
    }
}

/// Route `tracing` output to the browser console. Safe to call repeatedly.
#[wasm_bindgen]
pub fn init_logging(filter: &str) -> bool {
    crate::logging::init(filter)
}
