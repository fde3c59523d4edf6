#[cfg(feature = "tracing")]
macro_rules! wtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "overscan", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! wdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "overscan", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! wdebug {
    ($($tt:tt)*) => {};
}
