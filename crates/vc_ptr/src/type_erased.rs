use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

// -----------------------------------------------------------------------------
// Common methods

macro_rules! impl_ptr {
    ($ptr:ident) => {
        impl $ptr<'_> {
            /// Returns `true` if the address is aligned for `T`.
            #[inline]
            pub fn is_aligned<T>(&self) -> bool {
                self.0.as_ptr().cast::<T>().is_aligned()
            }

            /// Returns `true` if both pointers have the same address.
            #[inline]
            pub fn addr_eq<T: ?Sized>(&self, other: *const T) -> bool {
                core::ptr::addr_eq(self.0.as_ptr(), other)
            }

            #[cfg_attr(debug_assertions, track_caller)]
            #[cfg_attr(not(debug_assertions), inline(always))]
            fn debug_assert_aligned<T>(&self) {
                debug_assert!(
                    self.is_aligned::<T>(),
                    "pointer {:p} is not aligned for {}",
                    self.0,
                    core::any::type_name::<T>(),
                );
            }
        }

        impl fmt::Pointer for $ptr<'_> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Pointer::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $ptr<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:p})", stringify!($ptr), self.0)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Ptr

/// A type-erased shared borrow, equivalent to `&'a T` for an unknown `T`.
///
/// # Examples
///
/// ```
/// use vc_ptr::Ptr;
///
/// let value = 7_u32;
/// let ptr = Ptr::from_ref(&value);
/// assert!(ptr.addr_eq(&value));
///
/// // SAFETY: `ptr` was created from a `&u32`.
/// assert_eq!(unsafe { *ptr.as_ref::<u32>() }, 7);
/// ```
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Ptr<'a>(NonNull<u8>, PhantomData<&'a u8>);

impl_ptr!(Ptr);

impl<'a> Ptr<'a> {
    #[inline(always)]
    pub const fn from_ref<T: ?Sized>(val: &'a T) -> Ptr<'a> {
        Ptr(NonNull::from_ref(val).cast(), PhantomData)
    }

    #[inline(always)]
    pub const fn as_ptr(self) -> *const u8 {
        self.0.as_ptr()
    }

    /// Reads the pointee back as a `&'a T`.
    ///
    /// # Safety
    ///
    /// The pointer must address a live, properly aligned value of type `T`.
    #[inline(always)]
    pub unsafe fn as_ref<T>(self) -> &'a T {
        self.debug_assert_aligned::<T>();
        // SAFETY: Type correct, ptr aligned and pointee valid object.
        unsafe { &*self.0.as_ptr().cast::<T>() }
    }
}

impl<'a, T: ?Sized> From<&'a T> for Ptr<'a> {
    #[inline]
    fn from(val: &'a T) -> Self {
        Self::from_ref(val)
    }
}

// -----------------------------------------------------------------------------
// PtrMut

/// A type-erased unique borrow, equivalent to `&'a mut T` for an unknown `T`.
///
/// Not `Copy`: use [`reborrow`](PtrMut::reborrow) to pass it on without
/// giving it up.
#[repr(transparent)]
pub struct PtrMut<'a>(NonNull<u8>, PhantomData<&'a mut u8>);

impl_ptr!(PtrMut);

impl<'a> PtrMut<'a> {
    #[inline(always)]
    pub fn from_mut<T: ?Sized>(val: &'a mut T) -> PtrMut<'a> {
        PtrMut(NonNull::from(val).cast(), PhantomData)
    }

    #[inline(always)]
    pub const fn as_ptr(&self) -> *mut u8 {
        self.0.as_ptr()
    }

    #[inline(always)]
    pub const fn borrow(&self) -> Ptr<'_> {
        Ptr(self.0, PhantomData)
    }

    #[inline(always)]
    pub const fn reborrow(&mut self) -> PtrMut<'_> {
        PtrMut(self.0, PhantomData)
    }

    /// Converts into a type-erased shared borrow with the full lifetime.
    #[inline(always)]
    pub const fn into_const(self) -> Ptr<'a> {
        Ptr(self.0, PhantomData)
    }

    /// Turns the pointer back into a `&'a mut T`.
    ///
    /// # Safety
    ///
    /// The pointer must address a live, properly aligned value of type `T`.
    #[inline(always)]
    pub unsafe fn consume<T>(self) -> &'a mut T {
        self.debug_assert_aligned::<T>();
        // SAFETY: Type correct, ptr aligned and pointee valid object.
        unsafe { &mut *self.0.as_ptr().cast::<T>() }
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for PtrMut<'a> {
    #[inline]
    fn from(val: &'a mut T) -> Self {
        Self::from_mut(val)
    }
}

// -----------------------------------------------------------------------------
// Tests
