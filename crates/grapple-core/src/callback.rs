use std::fmt;
use std::rc::Rc;

/// A shared `Fn(A)` whose equality is identity.
///
/// Two clones of the same callback compare equal; two callbacks built from
/// identical closures do not. That makes a `Callback` usable as an effect
/// dependency: the effect re-runs only when a *new* callback is handed in.
pub struct Callback<A = ()>(Rc<dyn Fn(A)>);

impl<A: 'static> Callback<A> {
    pub fn new(f: impl Fn(A) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn emit(&self, arg: A) {
        (self.0)(arg)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<A> Eq for Callback<A> {}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

impl<A: 'static, F: Fn(A) + 'static> From<F> for Callback<A> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}
