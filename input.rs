/// Camera orientation driven by the mouse. Spin is not part of it; the ring
/// turns on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitView {
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Clone, Debug)]
pub struct OrbitControl {
    view: OrbitView,
    sensitivity: f32,
    drag_from: Option<(f32, f32)>,
}

impl OrbitControl {
    pub fn new(view: OrbitView, sensitivity: f32) -> Self {
        Self {
            view,
            sensitivity,
            drag_from: None,
        }
    }

    pub fn view(&self) -> OrbitView {
        self.view
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn press(&mut self, cursor: (f32, f32)) {
        self.drag_from = Some(cursor);
    }

    pub fn release(&mut self) {
        self.drag_from = None;
    }

    pub fn motion(&mut self, cursor: (f32, f32)) {
        let Some(last) = self.drag_from else {
            return;
        };
        let dx = cursor.0 - last.0;
        let dy = cursor.1 - last.1;
        self.view.yaw += dx * self.sensitivity;
        self.view.pitch += dy * self.sensitivity;
        self.drag_from = Some(cursor);
    }

    /// Feeds one frame of polled mouse state: button held or not, and the
    /// cursor position if the window reports one.
    pub fn update(&mut self, button_down: bool, cursor: Option<(f32, f32)>) {
        match (button_down, cursor, self.is_dragging()) {
            (false, _, true) => self.release(),
            (true, Some(pos), false) => self.press(pos),
            (true, Some(pos), true) => self.motion(pos),
            _ => {}
        }
    }
}
