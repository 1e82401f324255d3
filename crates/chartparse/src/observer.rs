//! Parser event notifications.

use std::fmt;

/// Category tag attached to each parser notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoCategory {
    /// A terminal edge was seeded from an input token.
    Seed,
    /// Rule invocation started a new active edge.
    Invocation,
    /// The fundamental rule combined an active and an inactive edge.
    Fundamental,
    /// Chart summary emitted while the results are extracted.
    Chart,
}

impl InfoCategory {
    /// The short tag used in log-style output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "I",
            Self::Invocation => "IV",
            Self::Fundamental => "FR",
            Self::Chart => "Chart",
        }
    }
}

impl fmt::Display for InfoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Receiver for info messages emitted while the chart is built.
///
/// Edge notifications arrive once per insertion, in insertion order, before
/// the final [`Chart`](InfoCategory::Chart) summary. They are purely
/// informational: an observer has no way to feed anything back into the
/// parse, and attaching one never changes the result.
pub trait ParserObserver {
    /// Called once per message.
    fn info(&mut self, category: InfoCategory, message: &str);
}

/// Any `FnMut(InfoCategory, &str)` closure is an observer.
impl<F> ParserObserver for F
where
    F: FnMut(InfoCategory, &str),
{
    fn info(&mut self, category: InfoCategory, message: &str) {
        self(category, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tags() {
        assert_eq!(InfoCategory::Seed.as_str(), "I");
        assert_eq!(InfoCategory::Invocation.as_str(), "IV");
        assert_eq!(InfoCategory::Fundamental.as_str(), "FR");
        assert_eq!(InfoCategory::Chart.to_string(), "Chart");
    }

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut observer = |category: InfoCategory, message: &str| {
                seen.push((category, message.to_owned()));
            };
            let obs: &mut dyn ParserObserver = &mut observer;
            obs.info(InfoCategory::Seed, "hello");
        }
        assert_eq!(seen, [(InfoCategory::Seed, "hello".to_owned())]);
    }
}
