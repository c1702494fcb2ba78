use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;

use crate::platform::debounce::Debouncer;

/// Signal that follows `source` once it has been quiet for `quiet`.
///
/// The debouncer lives as long as the calling component; unmounting cancels
/// any pending update.
pub fn use_debounced<T>(source: Signal<T>, quiet: Duration) -> Signal<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let mut settled = use_signal(|| source.peek().clone());
    let debouncer = use_hook(|| Rc::new(RefCell::new(Debouncer::new(source.peek().clone(), quiet))));

    let updates = use_hook({
        let debouncer = debouncer.clone();
        move || debouncer.borrow().subscribe()
    });

    use_future(move || {
        let mut updates = updates.clone();
        async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                if *settled.peek() != next {
                    settled.set(next);
                }
            }
        }
    });

    use_effect({
        let debouncer = debouncer.clone();
        move || {
            let next = source();
            debouncer.borrow_mut().push(next);
        }
    });

    use_drop(move || debouncer.borrow_mut().cancel());

    settled
}
