/// Unwraps a `Result<Option<T>, E>` inside a function returning
/// `Option<Result<U, F>>`: errors are converted and returned early, the
/// option is handed back to the caller.
#[macro_export]
macro_rules! try_some {
    ($expr:expr) => {
        match $expr {
            Ok(Some(v)) => Some(v),
            Ok(None) => None,
            Err(e) => return Some(Err(From::from(e))),
        }
    };
}
