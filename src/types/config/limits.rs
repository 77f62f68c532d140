//! Runtime limit configuration types

use std::num::NonZeroUsize;

nonzero_newtype! {
    /// A non-zero worker thread count
    ///
    /// # Examples
    /// ```
    /// use ccs::types::ThreadCount;
    ///
    /// let threads = ThreadCount::new(4).unwrap();
    /// assert_eq!(threads.get(), 4);
    /// assert!(ThreadCount::new(0).is_none());
    /// ```
    pub struct ThreadCount(NonZeroUsize: usize, serialize as serialize_u64);
}

impl ThreadCount {
    /// Number of CPUs reported by the OS, falling back to 1
    #[must_use]
    pub fn available() -> Self {
        std::thread::available_parallelism()
            .map(Self)
            .unwrap_or(Self(NonZeroUsize::MIN))
    }
}

impl std::str::FromStr for ThreadCount {
    type Err = String;

    /// `0` means "one worker per CPU"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<usize>()
            .map_err(|e| format!("invalid thread count '{}': {}", s, e))?;
        Ok(Self::new(value).unwrap_or_else(Self::available))
    }
}
