//! Three-valued discovery result.

/// Outcome of looking up a record during session bootstrap.
///
/// `Unknown` means the lookup has not run yet, `Absent` means it ran and found
/// nothing. Front ends hide a section while it is `Unknown` and show a "None"
/// placeholder once it is `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery<T> {
    /// Not queried yet.
    Unknown,
    /// Queried, nothing matched.
    Absent,
    /// Queried and found.
    Present(T),
}

impl<T> Default for Discovery<T> {
    fn default() -> Self {
        Discovery::Unknown
    }
}

impl<T> Discovery<T> {
    /// Builds a settled result from an optional lookup.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Discovery::Present(value),
            None => Discovery::Absent,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Discovery::Unknown)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Discovery::Absent)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Discovery::Present(_))
    }

    /// Returns `true` once the lookup has run, whatever it found.
    pub fn is_settled(&self) -> bool {
        !self.is_unknown()
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Discovery::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Discovery<&T> {
        match self {
            Discovery::Unknown => Discovery::Unknown,
            Discovery::Absent => Discovery::Absent,
            Discovery::Present(value) => Discovery::Present(value),
        }
    }

    pub fn map<U, F>(self, f: F) -> Discovery<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Discovery::Unknown => Discovery::Unknown,
            Discovery::Absent => Discovery::Absent,
            Discovery::Present(value) => Discovery::Present(f(value)),
        }
    }
}
