/// Treat an `Option` as the error side of a `Result`.
///
/// For validation passes that search for the first offending item: `Some(bad)` is the error,
/// and `None` means the input passed and `ok` is returned.
pub trait OptionExt<T> {
    fn err_or<T2>(self, ok: T2) -> Result<T2, T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn err_or<T2>(self, ok: T2) -> Result<T2, T> {
        match self {
            Some(bad) => Err(bad),
            None => Ok(ok),
        }
    }
}
