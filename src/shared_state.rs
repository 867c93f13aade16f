use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};



/// Cross-task shutdown flag.
///
/// While the counter is 0, all tasks continue with their work. Once it is
/// set, tasks should finish their current step and return. A task that is
/// blocked on input notices only when it wakes up.
#[derive(Default)]
pub struct SharedState {
    shut_down: AtomicUsize,
}



impl SharedState {
    pub fn shut_down(&self) {
        self.shut_down.store(1, Ordering::SeqCst);
    }



    /// Relaxed load, because we do not care on nanosecond shut down
    /// precission. We just have to shut down at some point.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Relaxed) != 0
    }
}
