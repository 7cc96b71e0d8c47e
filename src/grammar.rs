//! Parallel string rewriting.
//!
//! [`GrammarEngine`] holds an axiom and a [`RuleSet`] and rewrites the axiom
//! generation by generation. Every symbol of a generation is replaced at
//! once; symbols without a production are copied through unchanged.
//!
//! Turn magnitudes for `+` and `-` live in the same [`RuleSet`] but in a
//! separate map from the productions, so they can never be rewritten.

use crate::error::{LSystemError, Result};
use crate::turtle::Turn;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Limits that keep exponential grammars from exhausting memory.
#[derive(Clone, Debug)]
pub struct ExpansionConfig {
    /// Largest generation count `expand` accepts.
    pub max_generations: usize,
    /// Hard ceiling on expanded length, in bytes (one per ASCII symbol).
    pub max_length: usize,
    /// Length past which a warning is logged but expansion continues.
    pub warn_length: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_generations: 32,
            max_length: 16 * 1024 * 1024,
            warn_length: 1024 * 1024,
        }
    }
}

/// Productions plus the two turn magnitudes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    productions: HashMap<char, String>,
    left_degrees: Option<f64>,
    right_degrees: Option<f64>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement for `symbol`. The last definition wins.
    ///
    /// Only reached through [`define`](Self::define), which keeps `+`/`-` out.
    fn set_production(&mut self, symbol: char, replacement: impl Into<String>) {
        self.productions.insert(symbol, replacement.into());
    }

    pub fn production(&self, symbol: char) -> Option<&str> {
        self.productions.get(&symbol).map(String::as_str)
    }

    pub fn productions(&self) -> impl Iterator<Item = (char, &str)> {
        self.productions.iter().map(|(&k, v)| (k, v.as_str()))
    }

    pub fn set_turn_angle(&mut self, turn: Turn, degrees: f64) {
        match turn {
            Turn::Left => self.left_degrees = Some(degrees),
            Turn::Right => self.right_degrees = Some(degrees),
        }
    }

    /// Magnitude of `turn` in degrees, if one was defined.
    pub fn turn_angle(&self, turn: Turn) -> Option<f64> {
        match turn {
            Turn::Left => self.left_degrees,
            Turn::Right => self.right_degrees,
        }
    }

    /// Routes a `symbol -> text` definition to the right map.
    ///
    /// For `+`/`-` the text is a decimal number of degrees; anything else is
    /// a production.
    pub fn define(&mut self, symbol: char, text: &str) -> Result<()> {
        match Turn::from_symbol(symbol) {
            Some(turn) => {
                let degrees = parse_degrees(symbol, text)?;
                self.set_turn_angle(turn, degrees);
            }
            None => self.set_production(symbol, text),
        }
        Ok(())
    }

    /// One simultaneous rewrite pass over `input`, appended to `out`.
    fn rewrite_into(&self, input: &str, out: &mut String) {
        for ch in input.chars() {
            match self.productions.get(&ch) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(ch),
            }
        }
    }

    /// Length `input` will have after one pass, without building it.
    fn rewritten_len(&self, input: &str) -> usize {
        input
            .chars()
            .map(|ch| match self.productions.get(&ch) {
                Some(replacement) => replacement.len(),
                None => ch.len_utf8(),
            })
            .fold(0usize, usize::saturating_add)
    }
}

fn parse_degrees(symbol: char, text: &str) -> Result<f64> {
    let invalid = || LSystemError::InvalidAngle {
        symbol,
        value: text.to_string(),
    };
    let degrees: f64 = text.trim().parse().map_err(|_| invalid())?;
    if degrees.is_finite() {
        Ok(degrees)
    } else {
        Err(invalid())
    }
}

/// Owns an axiom and rule set and caches the latest expansion.
#[derive(Clone, Debug, Default)]
pub struct GrammarEngine {
    axiom: String,
    rules: RuleSet,
    expansion: String,
    generations: usize,
    config: ExpansionConfig,
}

impl GrammarEngine {
    pub fn new(config: ExpansionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Replaces the axiom and resets the cached expansion to it.
    pub fn set_axiom(&mut self, axiom: impl Into<String>) {
        self.axiom = axiom.into();
        self.expansion.clone_from(&self.axiom);
        self.generations = 0;
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// Defines `symbol -> replacement`. For `+`/`-` the replacement is the
    /// turn magnitude in degrees.
    pub fn define_rule(&mut self, symbol: char, replacement: &str) -> Result<()> {
        self.rules.define(symbol, replacement)
    }

    /// Parses and defines a rule written as `F=F-F++F-F` or `+=60`.
    pub fn parse_rule(&mut self, rule: &str) -> Result<()> {
        let mut chars = rule.chars();
        let (Some(symbol), Some('=')) = (chars.next(), chars.next()) else {
            return Err(LSystemError::MalformedRule(rule.to_string()));
        };
        self.define_rule(symbol, chars.as_str())
    }

    pub fn set_turn_angle(&mut self, turn: Turn, degrees: f64) {
        self.rules.set_turn_angle(turn, degrees);
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Rewrites the axiom `generations` times and caches the result.
    ///
    /// On error the previous expansion is kept.
    pub fn expand(&mut self, generations: usize) -> Result<&str> {
        if generations > self.config.max_generations {
            return Err(LSystemError::TooManyGenerations {
                requested: generations,
                limit: self.config.max_generations,
            });
        }

        let mut current = self.axiom.clone();
        let mut next = String::new();
        let mut warned = false;

        for generation in 1..=generations {
            let length = self.rules.rewritten_len(&current);
            if length > self.config.max_length {
                return Err(LSystemError::ExpansionLimit {
                    generation,
                    length,
                    limit: self.config.max_length,
                });
            }
            if length > self.config.warn_length && !warned {
                warn!(
                    generation,
                    length,
                    threshold = self.config.warn_length,
                    "L-System expansion is getting large"
                );
                warned = true;
            }

            next.clear();
            next.reserve(length);
            self.rules.rewrite_into(&current, &mut next);
            std::mem::swap(&mut current, &mut next);
        }

        debug!(generations, length = current.len(), "expanded L-System");
        self.expansion = current;
        self.generations = generations;
        Ok(&self.expansion)
    }

    /// The most recent expansion (the axiom until `expand` succeeds).
    pub fn expansion(&self) -> &str {
        &self.expansion
    }

    /// Generation count of the cached expansion.
    pub fn generations(&self) -> usize {
        self.generations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn koch() -> GrammarEngine {
        let mut engine = GrammarEngine::default();
        engine.parse_rule("F=F-F++F-F").unwrap();
        engine.parse_rule("+=60").unwrap();
        engine.parse_rule("-=60").unwrap();
        engine.set_axiom("-F++F++F");
        engine
    }

    #[test]
    fn set_axiom_resets_expansion() {
        let mut engine = koch();
        engine.expand(2).unwrap();
        engine.set_axiom("F");
        assert_eq!(engine.expansion(), "F");
        assert_eq!(engine.generations(), 0);
    }

    #[test]
    fn one_generation_is_simultaneous() {
        let mut engine = GrammarEngine::default();
        engine.define_rule('A', "AB").unwrap();
        engine.define_rule('B', "A").unwrap();
        engine.set_axiom("A");
        assert_eq!(engine.expand(1).unwrap(), "AB");
        assert_eq!(engine.expand(2).unwrap(), "ABA");
        assert_eq!(engine.expand(5).unwrap(), "ABAABABAABAAB");
    }

    #[test]
    fn turn_definitions_do_not_become_productions() {
        let engine = koch();
        assert_eq!(engine.rules().production('+'), None);
        assert_eq!(engine.rules().turn_angle(Turn::Left), Some(60.0));
        assert_eq!(engine.rules().turn_angle(Turn::Right), Some(60.0));
    }

    #[test]
    fn last_definition_wins() {
        let mut engine = GrammarEngine::default();
        engine.define_rule('F', "FF").unwrap();
        engine.define_rule('F', "F+F").unwrap();
        assert_eq!(engine.rules().production('F'), Some("F+F"));
    }

    #[test]
    fn empty_replacement_erases() {
        let mut engine = GrammarEngine::default();
        engine.parse_rule("X=").unwrap();
        engine.set_axiom("FXF");
        assert_eq!(engine.expand(1).unwrap(), "FF");
    }

    #[test]
    fn malformed_rules_rejected() {
        let mut engine = GrammarEngine::default();
        assert!(matches!(
            engine.parse_rule("F"),
            Err(LSystemError::MalformedRule(_))
        ));
        assert!(matches!(
            engine.parse_rule("F->FF"),
            Err(LSystemError::MalformedRule(_))
        ));
        assert!(matches!(
            engine.parse_rule(""),
            Err(LSystemError::MalformedRule(_))
        ));
    }

    #[test]
    fn bad_angles_rejected() {
        let mut engine = GrammarEngine::default();
        assert_eq!(
            engine.define_rule('+', "sixty"),
            Err(LSystemError::InvalidAngle {
                symbol: '+',
                value: "sixty".into()
            })
        );
        assert!(engine.define_rule('-', "inf").is_err());
        assert!(engine.define_rule('-', "NaN").is_err());
        engine.define_rule('-', " 22.5 ").unwrap();
        assert_eq!(engine.rules().turn_angle(Turn::Right), Some(22.5));
    }

    #[test]
    fn generation_limit() {
        let mut engine = GrammarEngine::new(ExpansionConfig {
            max_generations: 3,
            ..Default::default()
        });
        engine.set_axiom("F");
        assert_eq!(
            engine.expand(4),
            Err(LSystemError::TooManyGenerations {
                requested: 4,
                limit: 3
            })
        );
    }

    #[test]
    fn length_limit_keeps_previous_expansion() {
        let mut engine = GrammarEngine::new(ExpansionConfig {
            max_length: 100,
            ..Default::default()
        });
        engine.define_rule('F', "FF").unwrap();
        engine.set_axiom("F");
        assert_eq!(engine.expand(6).unwrap().len(), 64);

        let err = engine.expand(7).unwrap_err();
        assert_eq!(
            err,
            LSystemError::ExpansionLimit {
                generation: 7,
                length: 128,
                limit: 100
            }
        );
        assert_eq!(engine.expansion().len(), 64);
        assert_eq!(engine.generations(), 6);
    }

    #[test]
    fn soft_threshold_warns_once() {
        let (warnings, mut engine) = (WarnCounter::default(), doubling(4));
        let len = with_counter(&warnings, || engine.expand(5).unwrap().len());
        assert_eq!(len, 32);
        assert_eq!(warnings.count(), 1);
    }

    #[test]
    fn below_soft_threshold_is_silent() {
        let (warnings, mut engine) = (WarnCounter::default(), doubling(64));
        let len = with_counter(&warnings, || engine.expand(5).unwrap().len());
        assert_eq!(len, 32);
        assert_eq!(warnings.count(), 0);
    }

    fn doubling(warn_length: usize) -> GrammarEngine {
        let mut engine = GrammarEngine::new(ExpansionConfig {
            warn_length,
            ..Default::default()
        });
        engine.define_rule('F', "FF").unwrap();
        engine.set_axiom("F");
        engine
    }

    /// Counts WARN events seen while installed.
    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl WarnCounter {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn with_counter<T>(counter: &WarnCounter, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    #[test]
    fn unknown_characters_pass_through() {
        let mut engine = GrammarEngine::default();
        engine.define_rule('F', "F+F").unwrap();
        engine.set_axiom("äF?");
        assert_eq!(engine.expand(1).unwrap(), "äF+F?");
    }
}
