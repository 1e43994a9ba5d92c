//! `FlatMap` for the standard monadic containers.
//!
//! `#[do_notation]` emits `source.flat_map(continuation)` by default. The
//! standard library spells that `and_then` for `Option` and `Result` and has
//! no such method on `Vec`, so this trait fills the gap.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Monadic bind.
///
/// Continuations are `FnMut`: an implementation may call one zero, one or
/// many times. Generated continuations start every call from a clone of each
/// captured `mut` local, so those locals must be `Clone`.
pub trait FlatMap {
    /// The value handed to the continuation.
    type Item;

    /// The same container holding a `U`.
    type Output<U>;

    /// Feed the contained value(s) to `f` and flatten the result.
    fn flat_map<U, F>(self, f: F) -> Self::Output<U>
    where
        F: FnMut(Self::Item) -> Self::Output<U>;
}

impl<T> FlatMap for Option<T> {
    type Item = T;
    type Output<U> = Option<U>;

    #[inline]
    fn flat_map<U, F>(self, f: F) -> Option<U>
    where
        F: FnMut(T) -> Option<U>,
    {
        self.and_then(f)
    }
}

impl<T, E> FlatMap for Result<T, E> {
    type Item = T;
    type Output<U> = Result<U, E>;

    #[inline]
    fn flat_map<U, F>(self, f: F) -> Result<U, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        self.and_then(f)
    }
}

impl<T> FlatMap for Vec<T> {
    type Item = T;
    type Output<U> = Vec<U>;

    /// Calls `f` once per element, concatenating the results in order.
    #[inline]
    fn flat_map<U, F>(self, f: F) -> Vec<U>
    where
        F: FnMut(T) -> Vec<U>,
    {
        self.into_iter().flat_map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_short_circuits() {
        assert_eq!(Some(2).flat_map(|x| Some(x * 10)), Some(20));
        assert_eq!(None::<u8>.flat_map(|x| Some(x * 10)), None);
        assert_eq!(Some(2).flat_map(|_| None::<u8>), None);
    }

    #[test]
    fn result_keeps_first_error() {
        let ok: Result<u8, &str> = Ok(1);
        assert_eq!(ok.flat_map(|x| Ok::<_, &str>(x + 1)), Ok(2));
        let err: Result<u8, &str> = Err("boom");
        assert_eq!(err.flat_map(|x| Ok::<_, &str>(x + 1)), Err("boom"));
    }

    #[test]
    fn vec_calls_continuation_per_element() {
        let mut calls = 0;
        let out = vec![1, 2, 3].flat_map(|x| {
            calls += 1;
            vec![x; x]
        });
        assert_eq!(out, vec![1, 2, 2, 3, 3, 3]);
        assert_eq!(calls, 3);
    }

    #[test]
    fn vec_empty_never_calls_continuation() {
        let out = Vec::<u8>::new().flat_map(|_| -> Vec<u8> { panic!("must not be called") });
        assert!(out.is_empty());
    }
}
