//! Change notification for star content.
//!
//! Hosts subscribe to redraw map widgets when a star's displayed content
//! changes under them. Dispatch is synchronous and in subscription order.

use starchart_logic::StarId;

type Subscriber = Box<dyn FnMut(StarId)>;

/// Fan-out list of star change subscribers.
#[derive(Default)]
pub struct StarChangedSignal {
    subscribers: Vec<Subscriber>,
}

impl StarChangedSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(StarId) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn fire(&mut self, star_id: StarId) {
        for subscriber in &mut self.subscribers {
            subscriber(star_id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for StarChangedSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarChangedSignal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fires_to_every_subscriber_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = StarChangedSignal::new();

        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            signal.subscribe(move |star| seen.borrow_mut().push((tag, star)));
        }

        signal.fire(7);
        signal.fire(9);
        assert_eq!(
            *seen.borrow(),
            vec![("a", 7), ("b", 7), ("a", 9), ("b", 9)]
        );
    }

    #[test]
    fn fires_into_silence_without_subscribers() {
        let mut signal = StarChangedSignal::new();
        assert_eq!(signal.subscriber_count(), 0);
        signal.fire(3);
    }
}
