//! Variant expansion.
//!
//! Expansion is a fold over the discovered placeholders. Each pass takes the
//! current [`VariantSet`] and returns a new one in which every file state has
//! been fanned out into one copy per candidate of the placeholder:
//!
//! ```text
//! {template} --%1 (r0,r1)--> {r0, r1} --%2 (x,y,z)--> {r0x, r0y, r0z, r1x, r1y, r1z}
//! ```
//!
//! A line is a substitution site when it contains the placeholder and no `;`.
//! The candidate list is resolved once per pass, from the line above the
//! first site; later sites of the same placeholder reuse it by index.

use tracing::{debug, info, warn};

use crate::annotation;
use crate::error::{ExpandError, Result};
use crate::placeholder::Placeholder;
use crate::template::Template;

/// Which candidate a variant received for one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub placeholder: Placeholder,
    pub index: usize,
    pub value: String,
}

/// One copy of the template lines, possibly partially substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileState {
    lines: Vec<String>,
    choices: Vec<Choice>,
}

impl FileState {
    fn from_template(template: &Template) -> Self {
        Self {
            lines: template.lines().to_vec(),
            choices: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Candidates picked so far, in expansion order
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// The file content exactly as it will be written
    pub fn contents(&self) -> String {
        self.lines.concat()
    }
}

/// The working collection of file states, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    states: Vec<FileState>,
}

impl VariantSet {
    /// The starting set: one untouched copy of the template
    pub fn from_template(template: &Template) -> Self {
        Self {
            states: vec![FileState::from_template(template)],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileState> {
        self.states.iter()
    }
}

impl IntoIterator for VariantSet {
    type Item = FileState;
    type IntoIter = std::vec::IntoIter<FileState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariantSet {
    type Item = &'a FileState;
    type IntoIter = std::slice::Iter<'a, FileState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

fn is_site(line: &str, placeholder: &Placeholder) -> bool {
    !line.contains(';') && placeholder.occurs_in(line)
}

/// First substitution site of `placeholder` and the candidates governing it
struct FirstSite {
    index: usize,
    candidates: Vec<String>,
}

fn first_site(state: &FileState, placeholder: &Placeholder) -> Result<Option<FirstSite>> {
    let Some(index) = state.lines.iter().position(|l| is_site(l, placeholder)) else {
        return Ok(None);
    };
    let candidates = annotation::resolve(&state.lines, index, placeholder)
        .ok_or_else(|| ExpandError::unresolved(placeholder.as_str(), index))?;
    debug!(
        "{} at line {}: {} candidate(s) {:?}",
        placeholder,
        index + 1,
        candidates.len(),
        candidates
    );
    Ok(Some(FirstSite { index, candidates }))
}

/// Fan one state out over the candidates found at its first site
fn branch(state: FileState, placeholder: &Placeholder, site: FirstSite) -> Vec<FileState> {
    let mut branches: Vec<FileState> = site
        .candidates
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut copy = state.clone();
            copy.choices.push(Choice {
                placeholder: placeholder.clone(),
                index,
                value: value.clone(),
            });
            copy
        })
        .collect();

    for (i, line) in state.lines.iter().enumerate().skip(site.index) {
        if !is_site(line, placeholder) {
            continue;
        }
        for (copy, value) in branches.iter_mut().zip(&site.candidates) {
            copy.lines[i] = placeholder.replace_in(line, value);
        }
    }
    branches
}

/// Drives the placeholder fold, optionally bounded by a variant cap
#[derive(Debug, Clone, Copy, Default)]
pub struct Expander {
    max_variants: Option<usize>,
}

impl Expander {
    pub fn new(max_variants: Option<usize>) -> Self {
        Self { max_variants }
    }

    /// Expand a template over `placeholders`, in the given order.
    pub fn expand(&self, template: &Template, placeholders: &[Placeholder]) -> Result<VariantSet> {
        let start = VariantSet::from_template(template);
        self.check_limit(start.len())?;
        let set = placeholders
            .iter()
            .try_fold(start, |set, p| self.expand_placeholder(set, p))?;
        info!(
            "Expanded {} placeholder(s) into {} variant(s)",
            placeholders.len(),
            set.len()
        );
        Ok(set)
    }

    fn check_limit(&self, requested: usize) -> Result<()> {
        match self.max_variants {
            Some(limit) if requested > limit => {
                Err(ExpandError::VariantLimitExceeded { limit, requested })
            }
            _ => Ok(()),
        }
    }

    /// One pass: fan every state out over the candidates of `placeholder`.
    ///
    /// States without a substitution site pass through unchanged. Every
    /// site is resolved before anything is cloned, so a failing annotation or
    /// an exceeded cap leaves no partial work behind.
    pub fn expand_placeholder(
        &self,
        set: VariantSet,
        placeholder: &Placeholder,
    ) -> Result<VariantSet> {
        let sites = set
            .states
            .iter()
            .map(|state| first_site(state, placeholder))
            .collect::<Result<Vec<_>>>()?;

        if sites.iter().all(Option::is_none) {
            warn!("{} has no substitution site, skipping", placeholder);
            return Ok(set);
        }

        let requested = sites
            .iter()
            .map(|s| s.as_ref().map_or(1, |s| s.candidates.len()))
            .try_fold(0usize, usize::checked_add)
            .unwrap_or(usize::MAX);
        self.check_limit(requested)?;

        let mut states = Vec::with_capacity(requested);
        for (state, site) in set.states.into_iter().zip(sites) {
            match site {
                Some(site) => states.extend(branch(state, placeholder, site)),
                None => states.push(state),
            }
        }
        debug!("{} expanded to {} variant(s)", placeholder, states.len());
        Ok(VariantSet { states })
    }
}
