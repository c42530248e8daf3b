use std::fmt;

type BeforeLeave = Box<dyn FnMut(usize, usize)>;
type AfterLoad = Box<dyn FnMut(usize)>;

/// Lifecycle callbacks
///
/// `before_leave(from, to)` runs synchronously before the index changes.
/// `after_load(index)` runs at the end of the frame commit that shows `index`.
#[derive(Default)]
pub struct Hooks {
    before_leave: Option<BeforeLeave>,
    after_load: Option<AfterLoad>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_leave<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize, usize) + 'static,
    {
        self.before_leave = Some(Box::new(f));
        self
    }

    pub fn on_after_load<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + 'static,
    {
        self.after_load = Some(Box::new(f));
        self
    }

    pub(crate) fn before_leave(&mut self, from: usize, to: usize) {
        if let Some(f) = self.before_leave.as_mut() {
            f(from, to);
        }
    }

    pub(crate) fn after_load(&mut self, index: usize) {
        if let Some(f) = self.after_load.as_mut() {
            f(index);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_leave", &self.before_leave.is_some())
            .field("after_load", &self.after_load.is_some())
            .finish()
    }
}
