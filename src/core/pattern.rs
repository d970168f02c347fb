//! Filepath: src/core/pattern.rs
//! Wildcard matching for ignore and include patterns.
//!
//! Only two metacharacters are special:
//!   `*` matches zero or more characters, `?` matches exactly one.
//! Everything else is a literal, compared case-sensitively, and the
//! pattern must account for the whole text (no substring hits).

use std::fmt;

/// Full-string wildcard match of `text` against `pattern`.
///
/// Dynamic programming over prefixes: `dp[i][j]` is true when the first
/// `i` characters of `text` match the first `j` characters of `pattern`.
/// O(len(text) * len(pattern)) per call, no state kept between calls.
pub fn matches(
    text: &str,
    pattern: &str,
) -> bool
{
    if pattern.is_empty()
    {
        return text.is_empty();
    }

    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();

    let mut dp = vec![vec![false; p.len() + 1]; t.len() + 1];
    dp[0][0] = true;

    // Leading run of '*' can match the empty text
    for j in 1..=p.len()
    {
        if p[j - 1] == '*'
        {
            dp[0][j] = dp[0][j - 1];
        }
    }

    for i in 1..=t.len()
    {
        for j in 1..=p.len()
        {
            dp[i][j] = match p[j - 1]
            {
                // Either '*' matches nothing, or it swallows one more char
                '*' => dp[i][j - 1] || dp[i - 1][j],
                '?' => dp[i - 1][j - 1],
                c => c == t[i - 1] && dp[i - 1][j - 1],
            };
        }
    }

    dp[t.len()][p.len()]
}

/// True if any pattern in `patterns` matches `name`. Stops at the first hit.
pub fn matches_any(
    name: &str,
    patterns: &PatternSet,
) -> bool
{
    patterns
        .iter()
        .any(|p| matches(name, p))
}

/// Ordered list of wildcard patterns.
///
/// Order only matters for display and debugging; matching is existential.
/// Duplicates are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet
{
    patterns: Vec<String>,
}

impl PatternSet
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Append a pattern, preserving insertion order.
    pub fn push(
        &mut self,
        pattern: impl Into<String>,
    )
    {
        self.patterns
            .push(pattern.into());
    }

    /// Iterate patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str>
    {
        self.patterns
            .iter()
            .map(String::as_str)
    }

    pub fn len(&self) -> usize
    {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.patterns.is_empty()
    }

    /// Convenience wrapper over [`matches_any`].
    pub fn is_match(
        &self,
        name: &str,
    ) -> bool
    {
        matches_any(name, self)
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self
    {
        Self {
            patterns: iter
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for PatternSet
{
    fn extend<I: IntoIterator<Item = S>>(
        &mut self,
        iter: I,
    )
    {
        self.patterns
            .extend(
                iter.into_iter()
                    .map(Into::into),
            );
    }
}

impl fmt::Display for PatternSet
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        write!(f, "[{}]", self.patterns.join(", "))
    }
}
