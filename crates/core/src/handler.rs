//! Callback handles passed from screens into modal props.

use std::fmt;
use std::rc::Rc;

/// A cheaply clonable callback. Equality is identity: two handlers are equal
/// only when they share the same closure, which is what prop diffing needs.
pub struct Handler<A = ()> {
    f: Rc<dyn Fn(A)>,
}

impl<A> Handler<A> {
    pub fn new(f: impl Fn(A) + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    pub fn call(&self, arg: A) {
        (self.f)(arg)
    }
}

impl<A> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
        }
    }
}

impl<A> PartialEq for Handler<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl<A> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

impl<A, F> From<F> for Handler<A>
where
    F: Fn(A) + 'static,
{
    fn from(f: F) -> Self {
        Handler::new(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn clones_share_identity() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let a: Handler<u32> = Handler::new(move |n| sink.borrow_mut().push(n));
        let b = a.clone();
        let c: Handler<u32> = Handler::new(|_| {});

        assert_eq!(a, b);
        assert_ne!(a, c);

        b.call(7);
        assert_eq!(*seen.borrow(), vec![7]);
    }
}
