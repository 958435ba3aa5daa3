//! Composition of the encoder and the tag stripper.
//!
//! A [`Pipeline`] runs its [`Step`]s in order, each one consuming the
//! previous step's output. The text stays borrowed until some step actually
//! changes it.

use std::borrow::Cow;
use std::str::FromStr;

use scour_common::{Result, ScourError};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::encoder::{BREAK_FRAGMENT, Encoder};
use crate::strip::TagStripper;

/// One transform in a pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Remove `<...>` spans.
    StripTags,
    /// Escape `<`, `>`, `&` and `"`.
    Encode,
    /// Escape, and emit the break fragment before every newline.
    EncodeWithBreaks,
}

impl Step {
    /// Parse a step by its kebab-case name.
    ///
    /// # Errors
    ///
    /// Returns [`ScourError::UnknownStep`] if `name` is not a step.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| ScourError::UnknownStep(name.to_string()))
    }
}

/// Counters gathered by [`Pipeline::apply_with_stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Characters removed by tag-stripping steps.
    pub dropped: usize,
    /// Some strip step hit the end of its input inside a tag.
    pub unterminated: bool,
    /// How many steps changed the text.
    pub steps_changed: usize,
}

/// An ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    steps: Vec<Step>,
    plain: Encoder,
    breaking: Encoder,
    stripper: TagStripper,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(vec![Step::Encode])
    }
}

impl Pipeline {
    /// A pipeline running `steps` in order.
    #[must_use]
    pub const fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            plain: Encoder::new(),
            breaking: Encoder::new().with_newline_breaks(true),
            stripper: TagStripper::new(),
        }
    }

    /// Strip tags, then encode what is left.
    #[must_use]
    pub fn sanitize() -> Self {
        Self::new(vec![Step::StripTags, Step::Encode])
    }

    /// Append a step.
    #[must_use]
    pub fn then(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Use `fragment` instead of the default break for
    /// [`Step::EncodeWithBreaks`].
    #[must_use]
    pub fn with_break_fragment(mut self, fragment: impl Into<Cow<'static, str>>) -> Self {
        self.breaking = self.breaking.with_break_fragment(fragment);
        self
    }

    /// The steps, in run order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step over `text`.
    #[must_use]
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.apply_with_stats(text).0
    }

    /// Run every step over `text`, counting what the steps did.
    #[must_use]
    pub fn apply_with_stats<'a>(&self, text: &'a str) -> (Cow<'a, str>, PipelineStats) {
        let mut stats = PipelineStats::default();
        let mut current = Cow::Borrowed(text);
        for &step in &self.steps {
            current = match current {
                Cow::Borrowed(text) => self.run(step, text, &mut stats),
                Cow::Owned(text) => {
                    let changed = match self.run(step, &text, &mut stats) {
                        Cow::Borrowed(_) => None,
                        Cow::Owned(changed) => Some(changed),
                    };
                    Cow::Owned(changed.unwrap_or(text))
                }
            };
        }
        (current, stats)
    }

    /// Like [`Pipeline::apply`]; `None` passes through.
    #[must_use]
    pub fn apply_optional<'a>(&self, text: Option<&'a str>) -> Option<Cow<'a, str>> {
        text.map(|text| self.apply(text))
    }

    fn run<'a>(&self, step: Step, text: &'a str, stats: &mut PipelineStats) -> Cow<'a, str> {
        let out = match step {
            Step::StripTags => {
                let report = self.stripper.scan(text);
                stats.dropped += report.dropped;
                stats.unterminated |= report.unterminated;
                report.text
            }
            Step::Encode => self.plain.encode(text),
            Step::EncodeWithBreaks => self.breaking.encode(text),
        };
        if matches!(out, Cow::Owned(_)) {
            stats.steps_changed += 1;
        }
        out
    }
}

fn default_steps() -> Vec<Step> {
    vec![Step::Encode]
}

/// Serializable pipeline description.
///
/// ```json
/// { "steps": ["strip-tags", "encode-with-breaks"], "break_fragment": "<br />" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Steps to run, in order. Defaults to a single `encode`.
    #[serde(default = "default_steps")]
    pub steps: Vec<Step>,
    /// Replacement for the default newline break fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_fragment: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            break_fragment: None,
        }
    }
}

impl PipelineConfig {
    /// Parse a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScourError::Config`] if `json` is malformed, names an unknown
    /// step, or carries unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_named(json, "<inline>")
    }

    /// Parse a config from JSON, naming `origin` in any error.
    ///
    /// # Errors
    ///
    /// Same as [`PipelineConfig::from_json_str`].
    pub fn from_json_named(json: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| ScourError::Config {
            path: origin.to_string(),
            source,
        })
    }

    /// The break fragment this config will use.
    #[must_use]
    pub fn break_fragment(&self) -> &str {
        self.break_fragment.as_deref().unwrap_or(BREAK_FRAGMENT)
    }

    /// Build the pipeline this config describes.
    #[must_use]
    pub fn into_pipeline(self) -> Pipeline {
        let pipeline = Pipeline::new(self.steps);
        match self.break_fragment {
            Some(fragment) => pipeline.with_break_fragment(fragment),
            None => pipeline,
        }
    }
}

impl From<PipelineConfig> for Pipeline {
    fn from(config: PipelineConfig) -> Self {
        config.into_pipeline()
    }
}
