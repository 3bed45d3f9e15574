//! Type definitions for location arguments.

/// Anything that can be turned into a sequence of location fragments.
///
/// Store operations accept a single location (`"a.b.c"`) as well as several
/// fragments (`["a", "b.c"]`, `vec![key, "<<", "other"]`); both are passed
/// through [`join`](crate::join) before they address the tree.
pub trait LocationParts {
    /// Returns the fragments in order.
    fn fragments(&self) -> Vec<&str>;
}

impl LocationParts for str {
    fn fragments(&self) -> Vec<&str> {
        vec![self]
    }
}

impl LocationParts for String {
    fn fragments(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl<T: AsRef<str>> LocationParts for [T] {
    fn fragments(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>, const N: usize> LocationParts for [T; N] {
    fn fragments(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<T: AsRef<str>> LocationParts for Vec<T> {
    fn fragments(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<P: LocationParts + ?Sized> LocationParts for &P {
    fn fragments(&self) -> Vec<&str> {
        (**self).fragments()
    }
}
