use crate::error::HostError;
use js_sys::Function;
use wasm_bindgen::JsValue;

/// Collaborators the terminal is embedded in.
///
/// Calls are fire-and-forget: the terminal only inspects the result to tell
/// the user a capability is missing.
pub trait Host {
    fn open_application(&mut self, app_id: &str) -> Result<(), HostError>;
    fn create_folder(&mut self, name: &str) -> Result<(), HostError>;
    fn close_window(&mut self) -> Result<(), HostError>;
    fn track_event(&mut self, category: &str, action: &str) -> Result<(), HostError>;
    /// Current local time, human readable
    fn now(&self) -> String;
    /// Seconds since the session started
    fn uptime_secs(&self) -> u64;
}

/// Host backed by optional JavaScript callbacks.
pub struct JsHost {
    open_app: Option<Function>,
    add_folder: Option<Function>,
    close: Option<Function>,
    track: Option<Function>,
    started_ms: f64,
}

impl JsHost {
    pub fn new(
        open_app: Option<Function>,
        add_folder: Option<Function>,
        close: Option<Function>,
        track: Option<Function>,
    ) -> Self {
        JsHost {
            open_app,
            add_folder,
            close,
            track,
            started_ms: js_sys::Date::now(),
        }
    }
}

fn call(f: &Option<Function>, args: &[&str]) -> Result<(), HostError> {
    let f = f.as_ref().ok_or(HostError::Unavailable)?;
    let this = JsValue::NULL;
    let result = match args {
        [] => f.call0(&this),
        [a] => f.call1(&this, &JsValue::from_str(a)),
        [a, b, ..] => f.call2(&this, &JsValue::from_str(a), &JsValue::from_str(b)),
    };
    result
        .map(|_| ())
        .map_err(|e| HostError::Callback(e.as_string().unwrap_or_else(|| format!("{:?}", e))))
}

impl Host for JsHost {
    fn open_application(&mut self, app_id: &str) -> Result<(), HostError> {
        call(&self.open_app, &[app_id])
    }

    fn create_folder(&mut self, name: &str) -> Result<(), HostError> {
        call(&self.add_folder, &[name])
    }

    fn close_window(&mut self) -> Result<(), HostError> {
        call(&self.close, &[])
    }

    fn track_event(&mut self, category: &str, action: &str) -> Result<(), HostError> {
        call(&self.track, &[category, action])
    }

    fn now(&self) -> String {
        js_sys::Date::new_0().to_string().into()
    }

    fn uptime_secs(&self) -> u64 {
        ((js_sys::Date::now() - self.started_ms) / 1000.0).max(0.0) as u64
    }
}
