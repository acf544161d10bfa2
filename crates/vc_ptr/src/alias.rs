use alloc::rc::Rc;
use alloc::sync::Arc;
use core::fmt;
use core::ops::Deref;
use core::ptr::NonNull;

// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_alias {
    ($alias:ident, $owner:ident) => {
        impl<O: ?Sized> $alias<O, O> {
            /// Wraps `owner`, pointing at the owned value itself.
            #[inline]
            pub fn new(owner: $owner<O>) -> Self {
                let target = NonNull::from(&*owner);
                Self { owner, target }
            }
        }

        impl<O: ?Sized, T: ?Sized> $alias<O, T> {
            /// Projects to a value reachable from `T`, sharing the same owner.
            ///
            /// Returns `None` without touching the owner's count when `f` does.
            pub fn try_project<U: ?Sized>(
                this: &Self,
                f: impl for<'x> FnOnce(&'x T) -> Option<&'x U>,
            ) -> Option<$alias<O, U>> {
                let target = NonNull::from(f(&**this)?);
                Some($alias {
                    owner: $owner::clone(&this.owner),
                    target,
                })
            }

            /// Like [`try_project`](Self::try_project) but starting from a borrowed owner.
            pub fn try_from_owner<'o>(
                owner: &'o $owner<O>,
                f: impl FnOnce(&'o O) -> Option<&'o T>,
            ) -> Option<Self>
            where
                T: 'o,
            {
                let target = NonNull::from(f(&**owner)?);
                Some(Self {
                    owner: $owner::clone(owner),
                    target,
                })
            }

            /// The ownership block this pointer keeps alive.
            #[inline]
            pub fn owner(this: &Self) -> &$owner<O> {
                &this.owner
            }

            #[inline]
            pub fn as_ptr(this: &Self) -> *const T {
                this.target.as_ptr()
            }

            /// Returns `true` if both point at the same address.
            #[inline]
            pub fn ptr_eq<U: ?Sized>(this: &Self, other: &$alias<O, U>) -> bool {
                core::ptr::addr_eq(this.target.as_ptr(), other.target.as_ptr())
            }
        }

        impl<O: ?Sized, T: ?Sized> Deref for $alias<O, T> {
            type Target = T;

            #[inline]
            fn deref(&self) -> &T {
                // SAFETY: `target` was borrowed from the value kept alive by `owner`,
                // and the owner only ever hands out shared access.
                unsafe { self.target.as_ref() }
            }
        }

        impl<O: ?Sized, T: ?Sized> Clone for $alias<O, T> {
            #[inline]
            fn clone(&self) -> Self {
                Self {
                    owner: $owner::clone(&self.owner),
                    target: self.target,
                }
            }
        }

        impl<O: ?Sized, T: ?Sized + fmt::Debug> fmt::Debug for $alias<O, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&**self, f)
            }
        }

        impl<O: ?Sized, T: ?Sized> fmt::Pointer for $alias<O, T> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Pointer::fmt(&self.target, f)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// AliasArc

/// An `Arc<O>` that dereferences to a `T` living inside the owned value.
///
/// This is the aliasing constructor of shared pointers: the strong count of
/// `O` covers the alias, and dropping the alias releases it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_ptr::AliasArc;
///
/// struct Pair { left: u32, right: u32 }
///
/// let pair = Arc::new(Pair { left: 1, right: 2 });
/// let right = AliasArc::try_from_owner(&pair, |p| Some(&p.right)).unwrap();
///
/// assert_eq!(*right, 2);
/// assert_eq!(Arc::strong_count(&pair), 2);
/// drop(right);
/// assert_eq!(Arc::strong_count(&pair), 1);
/// # let _ = pair.left;
/// ```
pub struct AliasArc<O: ?Sized, T: ?Sized> {
    owner: Arc<O>,
    target: NonNull<T>,
}

impl_alias!(AliasArc, Arc);

// SAFETY: sending the alias sends an `Arc<O>` and a `&T`.
unsafe impl<O: ?Sized + Send + Sync, T: ?Sized + Sync> Send for AliasArc<O, T> {}

// SAFETY: sharing the alias shares an `Arc<O>` and a `&T`.
unsafe impl<O: ?Sized + Send + Sync, T: ?Sized + Sync> Sync for AliasArc<O, T> {}

// -----------------------------------------------------------------------------
// AliasRc

/// An `Rc<O>` that dereferences to a `T` living inside the owned value.
///
/// Single threaded counterpart of [`AliasArc`].
pub struct AliasRc<O: ?Sized, T: ?Sized> {
    owner: Rc<O>,
    target: NonNull<T>,
}

impl_alias!(AliasRc, Rc);

// -----------------------------------------------------------------------------
// Tests
