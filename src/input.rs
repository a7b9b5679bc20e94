// Pure input mapping shared by the DOM event handlers and host tests.

/// What a key press asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleMode,
    Assemble,
    Scatter,
    ToggleOverlay,
    ToggleFullscreen,
    ExitFullscreen,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " => Some(KeyAction::ToggleMode),
        "t" | "T" => Some(KeyAction::Assemble),
        "s" | "S" => Some(KeyAction::Scatter),
        "h" | "H" => Some(KeyAction::ToggleOverlay),
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        _ => None,
    }
}

/// Whether the browser default for this action must be suppressed
/// (Space scrolls, Enter activates the focused button).
#[inline]
pub fn suppresses_default(action: KeyAction) -> bool {
    matches!(action, KeyAction::ToggleMode | KeyAction::ToggleFullscreen)
}

/// Pointer drag tracking in canvas pixels.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: [f32; 2],
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, at: [f32; 2]) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last = at;
    }

    /// Movement since the previous sample, or `None` if this pointer is not
    /// the one dragging.
    pub fn advance(&mut self, pointer_id: i32, at: [f32; 2]) -> Option<[f32; 2]> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = [at[0] - self.last[0], at[1] - self.last[1]];
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        let was = self.active && pointer_id == self.pointer_id;
        if was {
            self.active = false;
        }
        was
    }
}

/// Normalize a wheel delta to pixels regardless of `deltaMode`
/// (0 = pixel, 1 = line, 2 = page).
#[inline]
pub fn wheel_pixels(delta_y: f64, delta_mode: u32) -> f32 {
    let scale = match delta_mode {
        1 => 16.0,
        2 => 800.0,
        _ => 1.0,
    };
    (delta_y * scale) as f32
}
