// Diagnostics go to `tracing` under the `recycler` target and compile to nothing without the
// `tracing` feature.

#[cfg(feature = "tracing")]
macro_rules! recycler_event {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "recycler", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! recycler_event {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! vtrace {
    ($($tt:tt)*) => {
        recycler_event!(trace, $($tt)*)
    };
}

macro_rules! vdebug {
    ($($tt:tt)*) => {
        recycler_event!(debug, $($tt)*)
    };
}

macro_rules! vwarn {
    ($($tt:tt)*) => {
        recycler_event!(warn, $($tt)*)
    };
}
