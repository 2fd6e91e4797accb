//! Transparent delegation to native instances.
//!
//! A wrapper holds one native instance and some auxiliary state. Every
//! operation the wrapper does not override is forwarded to the native instance
//! unchanged: same arguments, same return value, same error.
//!
//! - [`Delegate`] / [`DelegateMut`] expose the wrapped instance.
//! - [`Shell`] and [`Bound`] implement two-phase construction: auxiliary state
//!   is computed first, the delegate is bound exactly once, and only then is an
//!   immutable [`Bound`] value produced.
//! - [`forward!`](crate::forward) generates the pass-through methods of a
//!   native trait implementation.
//!
//! # Example
//!
//! ```
//! use tefoli_core::delegate::{Delegate, DelegateMut, Shell};
//! use tefoli_core::forward;
//!
//! trait Counter {
//!     fn get(&self) -> u32;
//!     fn bump(&mut self, by: u32) -> u32;
//! }
//!
//! struct Native(u32);
//!
//! impl Counter for Native {
//!     fn get(&self) -> u32 { self.0 }
//!     fn bump(&mut self, by: u32) -> u32 { self.0 += by; self.0 }
//! }
//!
//! struct Logged { native: Native, label: &'static str }
//!
//! impl Delegate for Logged {
//!     type Target = Native;
//!     fn wrapped(&self) -> &Native { &self.native }
//! }
//!
//! impl DelegateMut for Logged {
//!     fn wrapped_mut(&mut self) -> &mut Native { &mut self.native }
//! }
//!
//! impl Counter for Logged {
//!     forward! { Counter =>
//!         fn get(&self) -> u32;
//!         fn bump(&mut self, by: u32) -> u32;
//!     }
//! }
//!
//! let (native, label) = Shell::new("calls").bind(Native(1)).unwrap().build().unwrap().into_parts();
//! let mut logged = Logged { native, label };
//! assert_eq!(logged.bump(2), 3);
//! assert_eq!(logged.wrapped().get(), 3);
//! assert_eq!(logged.label, "calls");
//! ```

use std::ops::{Deref, DerefMut};

use crate::error::DelegateError;

/// Read access to the instance a wrapper delegates to.
pub trait Delegate {
    /// The wrapped native type.
    type Target: ?Sized;

    /// Returns the wrapped instance.
    fn wrapped(&self) -> &Self::Target;
}

/// Mutable access to the instance a wrapper delegates to.
pub trait DelegateMut: Delegate {
    /// Returns the wrapped instance mutably.
    fn wrapped_mut(&mut self) -> &mut Self::Target;
}

/// A wrapper under construction: auxiliary state present, delegate pending.
///
/// The auxiliary state is available through [`Shell::aux`] before the
/// delegate is bound, so it can be computed (or used to prepare the native
/// instance) first.
#[derive(Debug)]
pub struct Shell<N, A> {
    aux: A,
    native: Option<N>,
}

impl<N, A> Shell<N, A> {
    /// Allocates a shell holding only auxiliary state.
    pub fn new(aux: A) -> Self {
        Self { aux, native: None }
    }

    /// Returns the auxiliary state.
    pub fn aux(&self) -> &A {
        &self.aux
    }

    /// Returns true once a delegate has been bound.
    pub fn is_bound(&self) -> bool {
        self.native.is_some()
    }

    /// Binds the delegate.
    ///
    /// # Errors
    ///
    /// Returns [`DelegateError::AlreadyBound`] if a delegate was bound before.
    pub fn bind(mut self, native: N) -> Result<Self, DelegateError> {
        if self.native.is_some() {
            return Err(DelegateError::AlreadyBound);
        }
        self.native = Some(native);
        Ok(self)
    }

    /// Finishes construction.
    ///
    /// # Errors
    ///
    /// Returns [`DelegateError::MissingDelegate`] if no delegate was bound.
    pub fn build(self) -> Result<Bound<N, A>, DelegateError> {
        let native = self.native.ok_or(DelegateError::MissingDelegate)?;
        Ok(Bound {
            native,
            aux: self.aux,
        })
    }
}

/// A fully wired delegate and its auxiliary state.
#[derive(Debug)]
pub struct Bound<N, A> {
    native: N,
    aux: A,
}

impl<N, A> Bound<N, A> {
    /// Returns the bound delegate.
    pub fn native(&self) -> &N {
        &self.native
    }

    /// Returns the auxiliary state.
    pub fn aux(&self) -> &A {
        &self.aux
    }

    /// Splits into delegate and auxiliary state.
    pub fn into_parts(self) -> (N, A) {
        (self.native, self.aux)
    }
}

/// A native instance that is either owned by the wrapper or adopted from
/// its real owner.
///
/// An adopted instance is only borrowed: dropping the wrapper leaves it alive
/// and untouched.
#[derive(Debug)]
pub enum NativeRef<'a, T> {
    /// Created by the wrapper itself.
    Owned(T),
    /// Borrowed from the caller for the wrapper's lifetime.
    Adopted(&'a mut T),
}

impl<T> NativeRef<'_, T> {
    /// Returns true if the instance belongs to someone else.
    pub fn is_adopted(&self) -> bool {
        matches!(self, NativeRef::Adopted(_))
    }
}

impl<T> Deref for NativeRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            NativeRef::Owned(native) => native,
            NativeRef::Adopted(native) => native,
        }
    }
}

impl<T> DerefMut for NativeRef<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            NativeRef::Owned(native) => native,
            NativeRef::Adopted(native) => native,
        }
    }
}

/// Generates pass-through methods for a native trait implementation.
///
/// Each listed signature expands to a method that calls the same trait method
/// on [`Delegate::wrapped`] (`&self`) or [`DelegateMut::wrapped_mut`]
/// (`&mut self`) with the same arguments and returns its result untouched.
/// Overridden methods are written by hand next to the macro invocation; the
/// compiler rejects the impl if any trait method is neither forwarded nor
/// overridden.
#[macro_export]
macro_rules! forward {
    ($trait:ident =>) => {};

    ($trait:ident => fn $name:ident(&self $(, $arg:ident: $ty:ty)*) $(-> $ret:ty)?; $($rest:tt)*) => {
        #[inline]
        fn $name(&self $(, $arg: $ty)*) $(-> $ret)? {
            $trait::$name($crate::delegate::Delegate::wrapped(self) $(, $arg)*)
        }

        $crate::forward!($trait => $($rest)*);
    };

    ($trait:ident => fn $name:ident(&mut self $(, $arg:ident: $ty:ty)*) $(-> $ret:ty)?; $($rest:tt)*) => {
        #[inline]
        fn $name(&mut self $(, $arg: $ty)*) $(-> $ret)? {
            $trait::$name($crate::delegate::DelegateMut::wrapped_mut(self) $(, $arg)*)
        }

        $crate::forward!($trait => $($rest)*);
    };
}

#[cfg(test)]
#[path = "delegate_tests.rs"]
mod tests;
