/// This macro is used to create wrapper types around `Borrow<str>` values,
/// guaranteeing that the wrapped text complies with some syntactic rule.
///
/// The macro accepts the name of the wrapper,
/// then the (documented) signature and body of its checking `new` constructor,
/// then any number of additional inherent methods:
/// ```
/// # #[macro_use] extern crate rdfeq_api;
/// # use std::borrow::Borrow;
/// wrap! { Hello borrowing str :
///     /// Hello guarantees that the wrapped value contains `"hello"`.
///     pub fn new(inner: T) -> Result<Self, String> {
///         if inner.borrow().contains("hello") {
///             Ok(Self(inner))
///         } else {
///             Err("inner does not contain 'hello'".into())
///         }
///     }
/// }
/// let h = Hello::new("hello world").unwrap();
/// assert_eq!(h.as_str(), "hello world");
/// assert!(Hello::new("bye").is_err());
/// ```
///
/// The generated type gets:
/// * `new_unchecked`, `new_unchecked_const`, `unwrap`, `as_str`, `as_ref`, `map_unchecked`;
/// * [`Deref`](std::ops::Deref) to `str` and [`Borrow<str>`](std::borrow::Borrow);
/// * comparison, ordering and hashing consistent with the underlying `str`,
///   regardless of the wrapped type;
/// * [`Display`](std::fmt::Display) showing the underlying `str`.
#[macro_export]
macro_rules! wrap {
    ($wid: ident borrowing str :
     $(#[$attr: meta])*
     pub fn new($arg: ident: T) -> Result<Self, $err: ty> $new_body: block
     $($item: item)*
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug)]
        pub struct $wid<T: std::borrow::Borrow<str>>(T);

        impl<T: std::borrow::Borrow<str>> $wid<T> {
            #[doc = concat!("Build a new [`", stringify!($wid), "`], checking that `", stringify!($arg), "` is valid.")]
            pub fn new($arg: T) -> Result<Self, $err> $new_body

            #[doc = concat!("Build a new [`", stringify!($wid), "`] without checking its validity.")]
            ///
            /// Passing an invalid value will not cause undefined behaviour,
            /// but may produce terms that no RDF syntax can represent.
            pub fn new_unchecked($arg: T) -> Self {
                $wid($arg)
            }

            /// Returns the wrapped value, consuming `self`.
            pub fn unwrap(self) -> T {
                self.0
            }

            /// Gets a reference to the underlying `str`.
            pub fn as_str(&self) -> &str {
                self.0.borrow()
            }

            #[doc = concat!("Convert reference to a `", stringify!($wid), "<&str>`.")]
            pub fn as_ref(&self) -> $wid<&str> {
                $wid(self.0.borrow())
            }

            /// Map the wrapped value to another `Borrow<str>` type,
            /// assuming that the conversion preserves the text.
            pub fn map_unchecked<F, U>(self, f: F) -> $wid<U>
            where
                F: FnOnce(T) -> U,
                U: std::borrow::Borrow<str>,
            {
                $wid(f(self.0))
            }

            $($item)*
        }

        impl<'a> $wid<&'a str> {
            #[doc = concat!("Const version of [`", stringify!($wid), "::new_unchecked`].")]
            pub const fn new_unchecked_const($arg: &'a str) -> Self {
                $wid($arg)
            }
        }

        impl<T: std::borrow::Borrow<str>> std::ops::Deref for $wid<T> {
            type Target = str;

            fn deref(&self) -> &str {
                self.0.borrow()
            }
        }

        impl<T: std::borrow::Borrow<str>> std::borrow::Borrow<str> for $wid<T> {
            fn borrow(&self) -> &str {
                self.0.borrow()
            }
        }

        impl<T, U> PartialEq<$wid<U>> for $wid<T>
        where
            T: std::borrow::Borrow<str>,
            U: std::borrow::Borrow<str>,
        {
            fn eq(&self, other: &$wid<U>) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl<T: std::borrow::Borrow<str>> Eq for $wid<T> {}

        impl<T, U> PartialOrd<$wid<U>> for $wid<T>
        where
            T: std::borrow::Borrow<str>,
            U: std::borrow::Borrow<str>,
        {
            fn partial_cmp(&self, other: &$wid<U>) -> Option<std::cmp::Ordering> {
                Some(self.as_str().cmp(other.as_str()))
            }
        }

        impl<T: std::borrow::Borrow<str>> Ord for $wid<T> {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.as_str().cmp(other.as_str())
            }
        }

        impl<T: std::borrow::Borrow<str>> std::hash::Hash for $wid<T> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.as_str().hash(state)
            }
        }

        impl<T: std::borrow::Borrow<str>> std::fmt::Display for $wid<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
