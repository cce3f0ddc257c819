/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Replayable option sequences for per-operation configuration.
 */

use std::fmt;
use std::sync::Arc;

/// A single named mutation of a configuration record `C`.
///
/// Options are immutable once built; cloning shares the underlying setter.
pub struct ConfigOption<C> {
    setter: Arc<dyn Fn(&mut C) + Send + Sync>,
}

impl<C> ConfigOption<C> {
    pub fn new<F>(setter: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        Self {
            setter: Arc::new(setter),
        }
    }

    /// Apply this option to `cfg`.
    pub fn apply(&self, cfg: &mut C) {
        (self.setter)(cfg);
    }
}

impl<C> Clone for ConfigOption<C> {
    fn clone(&self) -> Self {
        Self {
            setter: Arc::clone(&self.setter),
        }
    }
}

impl<C> fmt::Debug for ConfigOption<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfigOption(..)")
    }
}

/// An ordered sequence of [`ConfigOption`]s.
///
/// The effective configuration is produced by applying every option, in
/// order, to `C::default()`, so the last option to touch a field wins.
pub struct Options<C> {
    opts: Vec<ConfigOption<C>>,
}

impl<C> Options<C> {
    pub fn new() -> Self {
        Self { opts: Vec::new() }
    }

    /// Append an option, returning the grown sequence.
    #[must_use]
    pub fn with(mut self, opt: ConfigOption<C>) -> Self {
        self.opts.push(opt);
        self
    }

    /// Creates a new sequence with the contents of `other` overriding the
    /// values set in this one. Neither input is modified.
    #[must_use]
    pub fn extend(&self, other: &Options<C>) -> Options<C> {
        let mut opts = Vec::with_capacity(self.opts.len() + other.opts.len());
        opts.extend(self.opts.iter().cloned());
        opts.extend(other.opts.iter().cloned());
        Options { opts }
    }

    pub fn len(&self) -> usize {
        self.opts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigOption<C>> {
        self.opts.iter()
    }
}

impl<C: Default> Options<C> {
    /// Apply all the options to a new configuration and return it.
    pub fn to_config(&self) -> C {
        let mut cfg = C::default();
        for opt in &self.opts {
            opt.apply(&mut cfg);
        }
        cfg
    }
}

impl<C> Default for Options<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Options<C> {
    fn clone(&self) -> Self {
        Self {
            opts: self.opts.clone(),
        }
    }
}

impl<C> fmt::Debug for Options<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("len", &self.opts.len())
            .finish()
    }
}

impl<C> From<Vec<ConfigOption<C>>> for Options<C> {
    fn from(opts: Vec<ConfigOption<C>>) -> Self {
        Self { opts }
    }
}

impl<C> From<&[ConfigOption<C>]> for Options<C> {
    fn from(opts: &[ConfigOption<C>]) -> Self {
        Self {
            opts: opts.to_vec(),
        }
    }
}

impl<C> FromIterator<ConfigOption<C>> for Options<C> {
    fn from_iter<I: IntoIterator<Item = ConfigOption<C>>>(iter: I) -> Self {
        Self {
            opts: iter.into_iter().collect(),
        }
    }
}

impl<'a, C> IntoIterator for &'a Options<C> {
    type Item = &'a ConfigOption<C>;
    type IntoIter = std::slice::Iter<'a, ConfigOption<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.opts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct TestConfig {
        name: String,
        count: u32,
        tags: Vec<String>,
    }

    fn with_name(val: &str) -> ConfigOption<TestConfig> {
        let val = val.to_string();
        ConfigOption::new(move |cfg: &mut TestConfig| cfg.name = val.clone())
    }

    fn with_count(val: u32) -> ConfigOption<TestConfig> {
        ConfigOption::new(move |cfg: &mut TestConfig| cfg.count = val)
    }

    fn with_tag(val: &str) -> ConfigOption<TestConfig> {
        let val = val.to_string();
        ConfigOption::new(move |cfg: &mut TestConfig| cfg.tags.push(val.clone()))
    }

    #[test]
    fn test_to_config_empty_is_zero_value() {
        let opts: Options<TestConfig> = Options::new();
        assert_eq!(opts.to_config(), TestConfig::default());
        assert!(opts.is_empty());
    }

    #[test]
    fn test_to_config_last_write_wins() {
        let opts = Options::new()
            .with(with_name("first"))
            .with(with_count(1))
            .with(with_name("second"));
        let cfg = opts.to_config();
        assert_eq!(cfg.name, "second");
        assert_eq!(cfg.count, 1);
    }

    #[test]
    fn test_extend_override_wins_and_base_fills_gaps() {
        let base = Options::from(vec![with_name("base"), with_count(3)]);
        let overrides = Options::from(vec![with_name("override")]);

        let cfg = base.extend(&overrides).to_config();
        assert_eq!(cfg.name, "override");
        assert_eq!(cfg.count, 3);
    }

    #[test]
    fn test_extend_does_not_mutate_inputs() {
        let base = Options::from(vec![with_name("base")]);
        let overrides = Options::from(vec![with_count(9)]);

        let extended = base.extend(&overrides);
        assert_eq!(extended.len(), 2);
        assert_eq!(base.len(), 1);
        assert_eq!(overrides.len(), 1);
        assert_eq!(base.to_config().count, 0);
        assert_eq!(overrides.to_config().name, "");
    }

    #[test]
    fn test_extend_is_associative() {
        let a = Options::from(vec![with_name("a"), with_count(1), with_tag("a")]);
        let b = Options::from(vec![with_count(2), with_tag("b")]);
        let c = Options::from(vec![with_name("c"), with_tag("c")]);

        let left = a.extend(&b).extend(&c).to_config();
        let right = a.extend(&b.extend(&c)).to_config();
        assert_eq!(left, right);
        assert_eq!(left.name, "c");
        assert_eq!(left.count, 2);
        assert_eq!(left.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_applying_same_option_twice() {
        let name = with_name("same");
        let tag = with_tag("t");
        let cfg = Options::from(vec![name.clone(), name, tag.clone(), tag]).to_config();
        assert_eq!(cfg.name, "same");
        // Non-idempotent setters are applied each time they appear.
        assert_eq!(cfg.tags, vec!["t", "t"]);
    }

    #[test]
    fn test_from_slice_and_iter() {
        let slice = [with_name("x"), with_count(5)];
        let from_slice = Options::from(&slice[..]);
        let collected: Options<TestConfig> = slice.iter().cloned().collect();
        assert_eq!(from_slice.to_config(), collected.to_config());
        assert_eq!((&collected).into_iter().count(), 2);
    }
}
