/// A shallow-merge update against a form value. Patch structs model each
/// field as an `Option`: `None` leaves the target field alone, `Some`
/// overwrites it. Closures work too for one-off edits.
pub trait FormPatch<T> {
    fn apply_to(self, data: &mut T);
}

impl<T, F> FormPatch<T> for F
where
    F: FnOnce(&mut T),
{
    fn apply_to(self, data: &mut T) {
        self(data)
    }
}

/// Single shared form value for a wizard run. Every step reads and writes
/// the same `T`; the revision counter lets callers detect that a key
/// handler touched the data.
#[derive(Debug, Default)]
pub struct FormStore<T> {
    data: T,
    revision: u64,
}

impl<T> FormStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            data: initial,
            revision: 0,
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, patch: impl FormPatch<T>) {
        patch.apply_to(&mut self.data);
        self.revision += 1;
    }

    /// Replaces the whole value, e.g. when hydrating a draft.
    pub fn replace(&mut self, data: T) {
        self.data = data;
        self.revision += 1;
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
