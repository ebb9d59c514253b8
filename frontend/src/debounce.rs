use gloo_timers::callback::Timeout;

/// Holds at most one pending timer; scheduling again cancels the previous
/// one, so only the last call in a burst runs.
#[derive(Default)]
pub struct Debouncer {
    handle: Option<Timeout>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&mut self, delay_ms: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        self.handle = Some(Timeout::new(delay_ms, callback));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

/// Somewhere to park one job until a quiet period ends.
pub trait DelayedTask {
    /// Replaces any job still waiting.
    fn schedule(&mut self, delay_ms: u32, job: Box<dyn FnOnce()>);
    fn cancel(&mut self);
}

impl DelayedTask for Debouncer {
    fn schedule(&mut self, delay_ms: u32, job: Box<dyn FnOnce()>) {
        Debouncer::schedule(self, delay_ms, job);
    }

    fn cancel(&mut self) {
        Debouncer::cancel(self);
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_burst_runs_only_last_callback() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut debouncer = Debouncer::new();

        for value in ["a", "ad", "ada"] {
            let fired = fired.clone();
            debouncer.schedule(20, move || fired.borrow_mut().push(value));
        }

        TimeoutFuture::new(60).await;
        assert_eq!(*fired.borrow(), vec!["ada"]);
    }

    #[wasm_bindgen_test]
    async fn test_cancel_prevents_callback() {
        let fired = Rc::new(RefCell::new(false));
        let mut debouncer = Debouncer::new();
        {
            let fired = fired.clone();
            debouncer.schedule(10, move || *fired.borrow_mut() = true);
        }
        debouncer.cancel();

        TimeoutFuture::new(30).await;
        assert!(!*fired.borrow());
    }
}
