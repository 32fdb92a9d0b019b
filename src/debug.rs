//! Macros for last-resort debugging.
//!
//! Error reporting of the decoder is limited to an error kind and a
//! position. To make debugging code that uses it a little easier, this
//! module contains a macro `xerr!()` that will print out a backtrace if the
//! `extra-debug` feature is enabled during build before resolving into
//! whatever the expression it encloses resolves to otherwise. Use it
//! whenever you initially produce an error, i.e.:
//!
//! ```rust,ignore
//! if b == 0x80 {
//!     xerr!(return Err(source.content_err(ErrorKind::UnsupportedEncoding)))
//! }
//! ```

#[cfg(feature = "extra-debug")]
pub use backtrace::Backtrace;

#[cfg(feature = "extra-debug")]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => {{
        eprintln!(
            "--- EXTRA DEBUG ---\n{:?}\n--- EXTRA DEBUG ---",
            $crate::debug::Backtrace::new()
        );
        $test
    }}
}

#[cfg(not(feature = "extra-debug"))]
#[macro_export]
macro_rules! xerr {
    ($test:expr) => { $test };
}
